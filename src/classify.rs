//! Folder role detection from output paths.
//!
//! Two roles matter to the sidebar, and both are fixed positions in the
//! output tree:
//!
//! ```text
//! packages/module-vpc                      ← package folder
//! packages/module-vpc/modules/vpc-app      ← module folder
//! ```
//!
//! The predicates are independent. Nothing in the layout prevents a path from
//! satisfying both, so callers query each flag on its own.

/// Top-level segment under which every package lives.
pub const PACKAGES_SEGMENT: &str = "packages";

/// Segment inside a package that holds its modules.
pub const MODULES_SEGMENT: &str = "modules";

/// Both role flags for one path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderRole {
    pub is_package_folder: bool,
    pub is_module_folder: bool,
}

/// Classify an output path into its folder role.
pub fn classify(path: &str) -> FolderRole {
    FolderRole {
        is_package_folder: is_package_folder(path),
        is_module_folder: is_module_folder(path),
    }
}

/// `packages/<name>`
pub fn is_package_folder(path: &str) -> bool {
    matches!(
        segments(path).as_slice(),
        [packages, name] if *packages == PACKAGES_SEGMENT && !name.is_empty()
    )
}

/// `packages/<package>/modules/<name>`
pub fn is_module_folder(path: &str) -> bool {
    matches!(
        segments(path).as_slice(),
        [packages, package, modules, name]
            if *packages == PACKAGES_SEGMENT
                && *modules == MODULES_SEGMENT
                && !package.is_empty()
                && !name.is_empty()
    )
}

/// Name of the package a relative path lives in, if any.
///
/// `packages/module-vpc/modules/vpc-app/overview.md` → `Some("module-vpc")`
pub fn package_name(path: &str) -> Option<&str> {
    match segments(path).as_slice() {
        [packages, name, ..] if *packages == PACKAGES_SEGMENT && !name.is_empty() => Some(*name),
        _ => None,
    }
}

/// Split a relative path on `/` after dropping one leading `./` or `/`.
pub(crate) fn segments(path: &str) -> Vec<&str> {
    let path = strip_leading(path);
    if path.is_empty() {
        return Vec::new();
    }
    path.split('/').collect()
}

/// Drop exactly one leading `./` or `/`.
pub(crate) fn strip_leading(path: &str) -> &str {
    path.strip_prefix("./")
        .or_else(|| path.strip_prefix('/'))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_folder_is_directly_under_packages() {
        assert!(is_package_folder("packages/module-vpc"));
        assert!(is_package_folder("./packages/module-vpc"));
        assert!(is_package_folder("/packages/module-vpc"));
    }

    #[test]
    fn packages_itself_is_not_a_package_folder() {
        assert!(!is_package_folder("packages"));
        assert!(!is_package_folder(""));
    }

    #[test]
    fn nested_folders_are_not_package_folders() {
        assert!(!is_package_folder("packages/module-vpc/modules"));
        assert!(!is_package_folder("guides/packages"));
        assert!(!is_package_folder("docs/packages/module-vpc"));
    }

    #[test]
    fn module_folder_is_inside_package_modules() {
        assert!(is_module_folder("packages/module-vpc/modules/vpc-app"));
        assert!(is_module_folder("./packages/module-vpc/modules/vpc-app"));
    }

    #[test]
    fn module_folder_requires_exact_shape() {
        assert!(!is_module_folder("packages/module-vpc/modules"));
        assert!(!is_module_folder("packages/module-vpc/examples/vpc-app"));
        assert!(!is_module_folder("packages/module-vpc/modules/vpc-app/_docs"));
        assert!(!is_module_folder("guides/module-vpc/modules/vpc-app"));
    }

    #[test]
    fn classify_reports_flags_independently() {
        assert_eq!(
            classify("packages/module-vpc"),
            FolderRole {
                is_package_folder: true,
                is_module_folder: false
            }
        );
        assert_eq!(
            classify("packages/module-vpc/modules/vpc-app"),
            FolderRole {
                is_package_folder: false,
                is_module_folder: true
            }
        );
        assert_eq!(classify("guides"), FolderRole::default());
    }

    #[test]
    fn package_name_from_nested_path() {
        assert_eq!(
            package_name("packages/module-vpc/modules/vpc-app/overview.md"),
            Some("module-vpc")
        );
        assert_eq!(package_name("packages/module-vpc"), Some("module-vpc"));
        assert_eq!(package_name("packages"), None);
        assert_eq!(package_name("guides/intro.md"), None);
    }

    #[test]
    fn strip_leading_removes_only_one_prefix() {
        assert_eq!(strip_leading("./a/b"), "a/b");
        assert_eq!(strip_leading("/a/b"), "a/b");
        assert_eq!(strip_leading("/./a"), "./a");
        assert_eq!(strip_leading("a/b"), "a/b");
    }
}
