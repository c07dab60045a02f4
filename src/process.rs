//! The generation run.
//!
//! ```text
//! 1. Scan      input/   →  NavTree + asset list   (walk, exclude, classify)
//! 2. Populate  NavTree  →  page bodies            (markdown → HTML, packages)
//! 3. Write     NavTree  →  output/                (pages, assets, theme)
//! ```
//!
//! [`scan`] only reads the input tree, which is what `docsite check` runs.
//! [`process`] runs all three stages. Every stage is fail-fast: the first
//! error ends the run and no cleanup of partial output is attempted.
//!
//! ## Theme Assets
//!
//! When a theme directory is given, its sub-directories are copied as:
//!
//! ```text
//! html/css/       →  output/_assets/css/      (each .css linked from every page)
//! html/img/       →  output/_assets/img/
//! html/favicons/  →  output/
//! ```

use crate::config::{self, CONFIG_FILE_NAME, SiteConfig};
use crate::file::{self, FileError, FileKind};
use crate::package::{self, PackageDescriptor};
use crate::page::{Page, RenderContext};
use crate::tree::{NavTree, TreeError};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Package manifest error: {0}")]
    Package(#[from] package::PackageError),
    #[error("Nav tree error: {0}")]
    Tree(#[from] TreeError),
    #[error("Failed to copy {} to {}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Directory of markdown pages and assets.
    pub input: PathBuf,
    /// Directory the site is written to.
    pub output: PathBuf,
    /// Theme directory with `css/`, `img/` and `favicons/`.
    pub html_dir: Option<PathBuf>,
    /// JSON packages manifest.
    pub packages_path: Option<PathBuf>,
    /// Extra exclude globs on top of `files.exclude`.
    pub excludes: Vec<String>,
}

/// What the walk found.
#[derive(Debug)]
pub struct Scan {
    pub tree: NavTree,
    /// Asset files, relative to the input root, in walk order.
    pub assets: Vec<PathBuf>,
    /// Files that matched neither pages nor assets.
    pub unmatched: Vec<PathBuf>,
    /// Entries skipped by exclude patterns (a skipped directory counts once).
    pub excluded: usize,
}

/// Result of a full run.
#[derive(Debug)]
pub struct ProcessResult {
    pub tree: NavTree,
    pub assets_copied: usize,
    pub unmatched: Vec<PathBuf>,
    pub excluded: usize,
    pub config: SiteConfig,
}

/// Load `docsite.toml` from the input root and add the command-line excludes.
pub fn load_config(opts: &Opts) -> Result<SiteConfig, ProcessError> {
    let mut config = config::load_config(&opts.input)?;
    config.files.exclude.extend(opts.excludes.iter().cloned());
    config.validate()?;
    Ok(config)
}

/// Walk the input tree and build the nav tree. Reads only.
pub fn scan(opts: &Opts, config: &SiteConfig) -> Result<Scan, ProcessError> {
    let excludes = config.exclude_patterns()?;
    let mut tree = NavTree::new();
    let mut assets = Vec::new();
    let mut unmatched = Vec::new();
    let mut excluded = 0;

    // Walk from the resolved input so entries compare equal to the resolved
    // output however either was spelled. A missing input is left for the
    // walk to report.
    let input = fs::canonicalize(&opts.input).unwrap_or_else(|_| opts.input.clone());
    let output = fs::canonicalize(&opts.output).ok();

    let walker = WalkDir::new(&input)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let rel = relative_to(entry.path(), &input);
            if output.as_deref() == Some(entry.path()) {
                debug!(path = %rel.display(), "skipping output directory");
                return false;
            }
            if should_skip_path(rel, &excludes) {
                debug!(path = %rel.display(), "skipping path");
                excluded += 1;
                return false;
            }
            true
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = relative_to(entry.path(), &input).to_path_buf();
        if rel == Path::new(CONFIG_FILE_NAME) {
            continue;
        }

        match file::classify_file(&rel, &config.files.asset_extensions) {
            Ok(FileKind::Page) => {
                let page = Page::new(&rel, entry.path());
                tree.add_page_to_tree(page)?;
            }
            Ok(FileKind::Asset) => assets.push(rel),
            Err(FileError::Unmatched(path)) => {
                warn!(path = %path.display(), "file matched no page or asset rule, skipping");
                unmatched.push(path);
            }
        }
    }

    info!(
        pages = tree.page_count(),
        folders = tree.folder_count() - 1,
        assets = assets.len(),
        "scanned {}",
        opts.input.display()
    );

    Ok(Scan {
        tree,
        assets,
        unmatched,
        excluded,
    })
}

/// Run the whole pipeline: scan, populate, write.
pub fn process(opts: &Opts) -> Result<ProcessResult, ProcessError> {
    let config = load_config(opts)?;
    let packages = package::load_packages(opts.packages_path.as_deref())?;
    debug!(count = packages.len(), "loaded packages");

    let Scan {
        mut tree,
        assets,
        unmatched,
        excluded,
    } = scan(opts, &config)?;

    fs::create_dir_all(&opts.output)?;
    for asset in &assets {
        copy_file(&opts.input.join(asset), &opts.output.join(asset))?;
    }

    let stylesheets = match &opts.html_dir {
        Some(html_dir) => copy_html_assets(html_dir, &opts.output)?,
        None => Vec::new(),
    };

    populate(&mut tree, &packages)?;

    let root = tree.root();
    let ctx = RenderContext::new(&config).with_stylesheets(stylesheets);
    tree.write_children_html(root, &opts.output, &ctx)?;
    info!(pages = tree.page_count(), "wrote {}", opts.output.display());

    Ok(ProcessResult {
        tree,
        assets_copied: assets.len(),
        unmatched,
        excluded,
        config,
    })
}

fn populate(tree: &mut NavTree, packages: &[PackageDescriptor]) -> Result<(), ProcessError> {
    let root = tree.root();
    tree.populate_children_page_body_properties(root, packages)?;
    Ok(())
}

/// True if `rel_path` matches an exclude glob. The input root never does.
fn should_skip_path(rel_path: &Path, excludes: &[Pattern]) -> bool {
    !rel_path.as_os_str().is_empty() && excludes.iter().any(|p| p.matches_path(rel_path))
}

fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn copy_file(from: &Path, to: &Path) -> Result<(), ProcessError> {
    let copy = || -> std::io::Result<()> {
        if let Some(dir) = to.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::copy(from, to)?;
        Ok(())
    };
    copy().map_err(|source| ProcessError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    debug!(from = %from.display(), to = %to.display(), "copied");
    Ok(())
}

/// Copy the theme directories and return the stylesheets to link, relative
/// to the output root.
pub fn copy_html_assets(html_dir: &Path, output: &Path) -> Result<Vec<String>, ProcessError> {
    let css_out = output.join("_assets/css");
    copy_theme_dir(&html_dir.join("css"), &css_out)?;
    copy_theme_dir(&html_dir.join("img"), &output.join("_assets/img"))?;
    copy_theme_dir(&html_dir.join("favicons"), output)?;

    let mut stylesheets = Vec::new();
    if css_out.is_dir() {
        for entry in WalkDir::new(&css_out).sort_by_file_name() {
            let entry = entry?;
            let is_css = entry
                .path()
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("css"));
            if entry.file_type().is_file() && is_css {
                let rel = relative_to(entry.path(), output);
                stylesheets.push(crate::page::to_slash_path(rel));
            }
        }
    }
    Ok(stylesheets)
}

fn copy_theme_dir(src: &Path, dst: &Path) -> Result<(), ProcessError> {
    if !src.is_dir() {
        debug!(path = %src.display(), "theme directory not found, skipping");
        return Ok(());
    }
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            let rel = relative_to(entry.path(), src);
            copy_file(entry.path(), &dst.join(rel))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn opts(input: &Path, output: &Path) -> Opts {
        Opts {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            html_dir: None,
            packages_path: None,
            excludes: Vec::new(),
        }
    }

    #[test]
    fn scan_builds_tree_from_markdown() {
        let input = setup_docs();
        let out = TempDir::new().unwrap();
        let opts = opts(input.path(), out.path());
        let scan = scan(&opts, &load_config(&opts).unwrap()).unwrap();

        let tree = &scan.tree;
        let root = tree.root();
        assert!(tree.has_child_folder(root, "guides"));
        assert!(tree.has_child_folder(root, "packages"));
        let vpc_app = tree.get_folder(root, "vpc-app").unwrap();
        assert!(tree.folder(vpc_app).is_module_folder);
        assert_eq!(tree.folder(root).child_pages.len(), 1);
    }

    #[test]
    fn scan_collects_assets_and_unmatched() {
        let input = setup_docs();
        let out = TempDir::new().unwrap();
        let opts = opts(input.path(), out.path());
        let scan = scan(&opts, &load_config(&opts).unwrap()).unwrap();

        assert_eq!(scan.assets, vec![PathBuf::from("guides/img/diagram.png")]);
        assert_eq!(
            scan.unmatched,
            vec![PathBuf::from("packages/module-vpc/main.tf")]
        );
    }

    #[test]
    fn scan_skips_excluded_and_config() {
        let input = setup_docs();
        fs::create_dir_all(input.path().join("drafts")).unwrap();
        fs::write(input.path().join("drafts/wip.md"), "# WIP").unwrap();
        fs::write(
            input.path().join(CONFIG_FILE_NAME),
            "[site]\ntitle = \"Test\"\n",
        )
        .unwrap();
        let out = TempDir::new().unwrap();
        let mut opts = opts(input.path(), out.path());
        opts.excludes.push("drafts".to_string());

        let config = load_config(&opts).unwrap();
        let scan = scan(&opts, &config).unwrap();

        assert!(!scan.tree.has_child_folder(scan.tree.root(), "drafts"));
        assert_eq!(scan.excluded, 1);
        assert!(scan.unmatched.iter().all(|p| p != Path::new(CONFIG_FILE_NAME)));
    }

    #[test]
    fn process_writes_pages_and_assets() {
        let input = setup_docs();
        let out = TempDir::new().unwrap();
        let result = process(&opts(input.path(), out.path())).unwrap();

        assert_eq!(result.tree.page_count(), 5);
        assert_eq!(result.assets_copied, 1);
        assert!(out.path().join("index.html").is_file());
        assert!(out.path().join("guides/aws/setup.html").is_file());
        assert!(out.path().join("guides/img/diagram.png").is_file());
        assert!(
            out.path()
                .join("packages/module-vpc/modules/vpc-app/core-concepts.html")
                .is_file()
        );
        assert!(!out.path().join("packages/module-vpc/main.tf").exists());
    }

    #[test]
    fn rebuild_with_output_inside_input_skips_output() {
        let input = setup_docs();
        // Spelled differently from the output path on purpose.
        let opts = opts(&input.path().join("."), &input.path().join("dist"));

        let first = process(&opts).unwrap();
        let second = process(&opts).unwrap();

        assert_eq!(first.assets_copied, 1);
        assert_eq!(second.assets_copied, 1);
        assert_eq!(second.tree.page_count(), first.tree.page_count());
        assert_eq!(
            second.unmatched,
            vec![PathBuf::from("packages/module-vpc/main.tf")]
        );
        assert!(!input.path().join("dist/dist").exists());
    }

    #[test]
    fn output_dir_is_not_counted_as_excluded() {
        let input = setup_docs();
        fs::create_dir_all(input.path().join("dist")).unwrap();
        let opts = opts(input.path(), &input.path().join("dist"));
        let scan = scan(&opts, &load_config(&opts).unwrap()).unwrap();
        assert_eq!(scan.excluded, 0);
        assert!(!scan.tree.has_child_folder(scan.tree.root(), "dist"));
    }

    #[test]
    fn process_copies_theme_assets() {
        let input = setup_docs();
        let out = TempDir::new().unwrap();
        let theme = TempDir::new().unwrap();
        fs::create_dir_all(theme.path().join("css")).unwrap();
        fs::write(theme.path().join("css/main.css"), "body{}").unwrap();
        fs::create_dir_all(theme.path().join("favicons")).unwrap();
        fs::write(theme.path().join("favicons/favicon.ico"), "ico").unwrap();

        let mut opts = opts(input.path(), out.path());
        opts.html_dir = Some(theme.path().to_path_buf());
        process(&opts).unwrap();

        assert!(out.path().join("_assets/css/main.css").is_file());
        assert!(out.path().join("favicon.ico").is_file());
        let setup = fs::read_to_string(out.path().join("guides/aws/setup.html")).unwrap();
        assert!(setup.contains(r#"href="../../_assets/css/main.css""#));
    }

    #[test]
    fn process_uses_packages_manifest() {
        let input = setup_docs();
        let out = TempDir::new().unwrap();
        let manifest = input.path().join("packages.json");
        fs::write(
            &manifest,
            r#"[{"name": "module-vpc", "url": "https://example.com/module-vpc"}]"#,
        )
        .unwrap();

        let mut opts = opts(input.path(), out.path());
        opts.packages_path = Some(manifest);
        opts.excludes.push("packages.json".to_string());
        process(&opts).unwrap();

        let overview =
            fs::read_to_string(out.path().join("packages/module-vpc/overview.html")).unwrap();
        assert!(overview.contains("https://example.com/module-vpc"));
    }

    #[test]
    fn process_fails_on_bad_packages_manifest() {
        let input = setup_docs();
        let out = TempDir::new().unwrap();
        let manifest = input.path().join("packages.json");
        fs::write(&manifest, "not json").unwrap();

        let mut opts = opts(input.path(), out.path());
        opts.packages_path = Some(manifest);
        assert!(matches!(process(&opts), Err(ProcessError::Package(_))));
    }

    #[test]
    fn missing_input_is_walk_error() {
        let tmp = TempDir::new().unwrap();
        let opts = opts(&tmp.path().join("missing"), &tmp.path().join("out"));
        let result = scan(&opts, &SiteConfig::default());
        assert!(matches!(result, Err(ProcessError::Walk(_))));
    }
}
