//! Shared test utilities for the docsite test suite.
//!
//! Pages built here point at sources that do not exist, so they are only
//! good for tree, ordering and rendering tests. Tests that read or write
//! files use [`setup_docs`].
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let mut tree = NavTree::new();
//! tree.add_page_to_tree(page_at("guides/aws/setup.md")).unwrap();
//! let html = render_nav(...).into_string();
//! assert_in_order(&html, &["Guides", "Aws", "Setup"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::page::Page;
use crate::tree::{FolderId, NavTree, PageId};

// =========================================================================
// Fixture setup
// =========================================================================

/// Input files written by [`setup_docs`].
pub const DOCS: &[(&str, &str)] = &[
    ("index.md", "# Home\n\nWelcome.\n"),
    ("introduction/welcome.md", "# Welcome\n\nStart with the [setup](../guides/aws/setup.md).\n"),
    ("guides/aws/setup.md", "# Setup\n\nRun the installer.\n"),
    ("guides/img/diagram.png", "png"),
    ("packages/module-vpc/overview.md", "# Overview\n\nA VPC.\n"),
    ("packages/module-vpc/main.tf", "resource {}\n"),
    (
        "packages/module-vpc/modules/vpc-app/core-concepts.md",
        "# Core Concepts\n\nSubnets.\n",
    ),
];

/// Write [`DOCS`] into a fresh temp directory and return it.
pub fn setup_docs() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (path, contents) in DOCS {
        write_file(tmp.path(), path, contents);
    }
    tmp
}

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

// =========================================================================
// Pages
// =========================================================================

/// Page at `path` whose source does not exist.
pub fn page_at(path: &str) -> Page {
    Page::new(path, Path::new("/nonexistent").join(path))
}

/// Page at `path` with an explicit title.
pub fn titled_page_at(path: &str, title: &str) -> Page {
    let mut page = page_at(path);
    page.title = title.to_string();
    page
}

/// Top-level page with an explicit title.
pub fn titled_page(title: &str) -> Page {
    titled_page_at(&format!("{title}.md"), title)
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn folder_names<'a>(tree: &'a NavTree, ids: &[FolderId]) -> Vec<&'a str> {
    ids.iter().map(|&id| tree.folder(id).name.as_str()).collect()
}

pub fn page_titles<'a>(tree: &'a NavTree, ids: &[PageId]) -> Vec<&'a str> {
    ids.iter().map(|&id| tree.page(id).title.as_str()).collect()
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert each needle occurs in `haystack`, each after the previous one.
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut pos = 0;
    for needle in needles {
        match haystack[pos..].find(needle) {
            Some(offset) => pos += offset + needle.len(),
            None => panic!(
                "expected {needle:?} after byte {pos} in order {needles:?}\n---\n{haystack}"
            ),
        }
    }
}
