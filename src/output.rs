//! CLI output formatting.
//!
//! The tree is shown the way the sidebar orders it: pinned top-level folders
//! first, folders by name, "Overview" pages first. Each page line carries
//! its output path.
//!
//! ## Check
//!
//! ```text
//! Home → index.html
//! Guides/
//!     Aws/
//!         Setup → guides/aws/setup.html
//! Packages/
//!     Module Vpc/ [package]
//!         Overview → packages/module-vpc/overview.html
//!         Modules/
//!             vpc-app/ [module]
//!                 Core Concepts → packages/module-vpc/modules/vpc-app/core-concepts.html
//!
//! Found 4 pages in 6 folders, 1 asset
//! Skipped 1 unmatched file
//!     packages/module-vpc/main.tf
//! ```
//!
//! ## Build
//!
//! Same tree, then:
//!
//! ```text
//! Wrote 4 pages and 1 asset to dist
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) and a
//! `print_*` wrapper that writes to stdout. Format functions do no I/O.

use crate::nav::folder_display_name;
use crate::ordering;
use crate::process::{ProcessResult, Scan};
use crate::tree::{FolderId, NavTree};
use std::path::{Path, PathBuf};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// The nav tree, one line per folder or page.
pub fn format_tree(tree: &NavTree, top_level_order: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    let root = tree.folder(tree.root());

    for page_id in ordering::sort_pages(tree, &root.child_pages) {
        let page = tree.page(page_id);
        lines.push(format!("{} → {}", page.title, page.output_path));
    }
    let top = ordering::reorder_top_level_folders(tree, &root.child_folders, top_level_order);
    for folder_id in top {
        format_folder(tree, folder_id, 0, &mut lines);
    }
    lines
}

fn format_folder(tree: &NavTree, id: FolderId, depth: usize, lines: &mut Vec<String>) {
    let folder = tree.folder(id);
    let role = if folder.is_package_folder {
        " [package]"
    } else if folder.is_module_folder {
        " [module]"
    } else {
        ""
    };
    lines.push(format!("{}{}/{}", indent(depth), folder_display_name(folder), role));

    for page_id in ordering::sort_pages(tree, &folder.child_pages) {
        let page = tree.page(page_id);
        lines.push(format!(
            "{}{} → {}",
            indent(depth + 1),
            page.title,
            page.output_path
        ));
    }
    for child in ordering::sort_folders(tree, &folder.child_folders) {
        format_folder(tree, child, depth + 1, lines);
    }
}

fn format_unmatched(unmatched: &[PathBuf], lines: &mut Vec<String>) {
    if unmatched.is_empty() {
        return;
    }
    lines.push(format!(
        "Skipped {}",
        plural(unmatched.len(), "unmatched file", "unmatched files")
    ));
    for path in unmatched {
        lines.push(format!("{}{}", indent(1), path.display()));
    }
}

/// Output of `docsite check`.
pub fn format_scan_output(scan: &Scan, top_level_order: &[String]) -> Vec<String> {
    let mut lines = format_tree(&scan.tree, top_level_order);
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Found {} in {}, {}",
        plural(scan.tree.page_count(), "page", "pages"),
        plural(scan.tree.folder_count() - 1, "folder", "folders"),
        plural(scan.assets.len(), "asset", "assets"),
    ));
    format_unmatched(&scan.unmatched, &mut lines);
    lines
}

/// Output of `docsite build`.
pub fn format_build_output(result: &ProcessResult, output: &Path) -> Vec<String> {
    let mut lines = format_tree(&result.tree, &result.config.nav.top_level_order);
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Wrote {} and {} to {}",
        plural(result.tree.page_count(), "page", "pages"),
        plural(result.assets_copied, "asset", "assets"),
        output.display()
    ));
    format_unmatched(&result.unmatched, &mut lines);
    lines
}

pub fn print_scan_output(scan: &Scan, top_level_order: &[String]) {
    for line in format_scan_output(scan, top_level_order) {
        println!("{}", line);
    }
}

pub fn print_build_output(result: &ProcessResult, output: &Path) {
    for line in format_build_output(result, output) {
        println!("{}", line);
    }
}
