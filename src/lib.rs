//! # docsite
//!
//! A static documentation site generator. The input directory tree is the
//! navigation: folders become sidebar sections, markdown files become pages,
//! and every page embeds the complete tree so readers can move anywhere.
//!
//! # Architecture: Scan, Populate, Write
//!
//! ```text
//! 1. Scan      docs/    →  NavTree    (walk, exclude, classify files)
//! 2. Populate  NavTree  →  NavTree    (markdown bodies, titles, packages)
//! 3. Write     NavTree  →  dist/      (one HTML file per page, plus assets)
//! ```
//!
//! The tree is an arena: folders and pages live in two vectors on
//! [`tree::NavTree`] and refer to each other by index. Page rendering needs
//! the whole tree while one page is being written, so the write pass borrows
//! the tree immutably and each page looks up its relatives by id.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tree`] | Arena nav tree: folder creation from paths, lookups, populate and write passes |
//! | [`classify`] | Path classifier for `packages/<name>` and `packages/<pkg>/modules/<name>` folders |
//! | [`ordering`] | Pinned top-level order, folder name order, "Overview"-first page order |
//! | [`nav`] | Sidebar HTML for the whole tree as seen from one page |
//! | [`page`] | Page model: markdown population, relative links, writing |
//! | [`template`] | Document shell around each page, built with Maud |
//! | [`file`] | Input file classification: page, asset, or unmatched |
//! | [`package`] | Optional JSON manifest describing packages |
//! | [`config`] | `docsite.toml` loading, merging over stock defaults, validation |
//! | [`naming`] | Display names and titles from file and folder names |
//! | [`process`] | The generation run tying the stages together |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Sorting on Read
//!
//! Child lists are stored in insertion order (the walk's file-name order).
//! The renderer sorts copies of them each time it needs an order, so
//! rendering never mutates the tree and the same tree can be rendered from
//! every page.
//!
//! ## Folder Roles From Paths
//!
//! Whether a folder is a package or a module folder depends only on its
//! output path. Roles are fixed when the folder is created and surface as
//! CSS classes on the sidebar entries. Classes concatenate, so a folder can
//! be both `top_level_folder` and `package_folder`.
//!
//! ## Fail Fast
//!
//! The first error ends the run. Pages already written stay on disk.

pub mod classify;
pub mod config;
pub mod file;
pub mod naming;
pub mod nav;
pub mod ordering;
pub mod output;
pub mod package;
pub mod page;
pub mod process;
pub mod template;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_helpers;
