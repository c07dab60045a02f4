//! The navigation tree: folders and pages mirroring the output directory.
//!
//! ## Storage
//!
//! Folders and pages live in two flat arenas owned by [`NavTree`]. Children
//! are tracked as lists of [`FolderId`] / [`PageId`] and every node keeps an
//! optional index back to its parent. Ownership flows only downward through
//! the arenas, so there is no reference cycle to manage and nodes are never
//! removed once created.
//!
//! ```text
//! NavTree
//! ├── folders: [ROOT-FOLDER, packages, module-vpc, modules, vpc-app, ...]
//! └── pages:   [overview.html, vpc-app/core-concepts.html, ...]
//! ```
//!
//! ## Building
//!
//! The tree is built while the input directory is walked. Folders are created
//! on demand by [`NavTree::create_folder_if_not_exist`] from the slash-delimited
//! relative path of each page. Creation is idempotent: sibling folders with the
//! same name are merged, never duplicated.
//!
//! ## Traversals
//!
//! Two whole-tree passes run after the walk, both pre-order (a folder's own
//! pages before its child folders) and both fail-fast:
//!
//! - [`NavTree::populate_children_page_body_properties`] fills in page bodies.
//! - [`NavTree::write_children_html`] writes each page to disk.

use crate::classify::{self, FolderRole};
use crate::package::PackageDescriptor;
use crate::page::{Page, PageError, RenderContext};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name given to the root folder. Never shown in the sidebar.
pub const ROOT_FOLDER_NAME: &str = "ROOT-FOLDER";

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Invalid folder path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
    #[error("Failed to populate page {}", .path.display())]
    PopulatePage {
        path: PathBuf,
        #[source]
        source: PageError,
    },
    #[error("Failed to write page {}", .path.display())]
    WritePage {
        path: PathBuf,
        #[source]
        source: PageError,
    },
}

/// Index of a folder in its [`NavTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(usize);

/// Index of a page in its [`NavTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(usize);

/// A node in the navigation tree.
#[derive(Debug, Clone)]
pub struct Folder {
    /// Relative path where this folder ends up in the output directory.
    pub output_path: String,
    /// Last segment of `output_path`.
    pub name: String,
    pub child_pages: Vec<PageId>,
    pub child_folders: Vec<FolderId>,
    /// Set when the folder is attached. `None` only for the root.
    pub parent: Option<FolderId>,
    pub is_root: bool,
    /// `packages/<name>`: collapses its sub-folders in the sidebar.
    pub is_package_folder: bool,
    /// `packages/<package>/modules/<name>`: name is shown verbatim.
    pub is_module_folder: bool,
}

impl Folder {
    /// A detached folder whose role flags are derived from `output_path`.
    pub fn new(output_path: impl Into<String>, name: impl Into<String>) -> Self {
        let output_path = output_path.into();
        let FolderRole {
            is_package_folder,
            is_module_folder,
        } = classify::classify(&output_path);
        Self {
            output_path,
            name: name.into(),
            child_pages: Vec::new(),
            child_folders: Vec::new(),
            parent: None,
            is_root: false,
            is_package_folder,
            is_module_folder,
        }
    }

    fn root() -> Self {
        Self {
            output_path: String::new(),
            name: ROOT_FOLDER_NAME.to_string(),
            child_pages: Vec::new(),
            child_folders: Vec::new(),
            parent: None,
            is_root: true,
            is_package_folder: false,
            is_module_folder: false,
        }
    }
}

/// Arena holding every folder and page of one generation run.
#[derive(Debug, Clone)]
pub struct NavTree {
    folders: Vec<Folder>,
    pages: Vec<Page>,
}

impl Default for NavTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NavTree {
    /// A tree containing only the root folder.
    pub fn new() -> Self {
        Self {
            folders: vec![Folder::root()],
            pages: Vec::new(),
        }
    }

    pub fn root(&self) -> FolderId {
        FolderId(0)
    }

    pub fn folder(&self, id: FolderId) -> &Folder {
        &self.folders[id.0]
    }

    pub fn page(&self, id: PageId) -> &Page {
        &self.pages[id.0]
    }

    pub fn page_mut(&mut self, id: PageId) -> &mut Page {
        &mut self.pages[id.0]
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages in creation order.
    pub fn pages(&self) -> impl Iterator<Item = (PageId, &Page)> {
        self.pages.iter().enumerate().map(|(i, p)| (PageId(i), p))
    }

    /// Attach `child` under `parent` and return its id.
    ///
    /// Insertion order is kept; ordering is applied when the sidebar renders.
    pub fn add_folder(&mut self, parent: FolderId, mut child: Folder) -> FolderId {
        let id = FolderId(self.folders.len());
        child.parent = Some(parent);
        self.folders.push(child);
        self.folders[parent.0].child_folders.push(id);
        id
    }

    /// Attach `page` under `parent` and return its id.
    pub fn add_page(&mut self, parent: FolderId, mut page: Page) -> PageId {
        let id = PageId(self.pages.len());
        page.parent = Some(parent);
        self.pages.push(page);
        self.folders[parent.0].child_pages.push(id);
        id
    }

    /// Place a page in the folder matching its input directory.
    ///
    /// Pages at the top of the input tree go straight into the root.
    pub fn add_page_to_tree(&mut self, page: Page) -> Result<PageId, TreeError> {
        let folder = match page.folder_path() {
            Some(dir) => self.create_folder_if_not_exist(self.root(), &dir)?,
            None => self.root(),
        };
        Ok(self.add_page(folder, page))
    }

    /// Walk `folder_path` (`x/y/z`, `./x/y/z` or `/x/y/z`) one segment at a
    /// time starting at `from`, creating any folder that does not exist yet.
    ///
    /// Returns the folder for the last segment. Calling this twice with the
    /// same path returns the same folder and creates nothing the second time.
    pub fn create_folder_if_not_exist(
        &mut self,
        from: FolderId,
        folder_path: &str,
    ) -> Result<FolderId, TreeError> {
        let segments = validate_segments(folder_path)?;

        let mut current = from;
        for segment in segments {
            current = match self.get_child_folder(current, segment) {
                Some(existing) => existing,
                None => {
                    let output_path = join_output_path(&self.folder(current).output_path, segment);
                    debug!(path = %output_path, "creating nav folder");
                    self.add_folder(current, Folder::new(output_path, segment))
                }
            };
        }
        Ok(current)
    }

    /// True if a direct child of `folder` is named `name`.
    pub fn has_child_folder(&self, folder: FolderId, name: &str) -> bool {
        self.get_child_folder(folder, name).is_some()
    }

    /// The direct child of `folder` named `name`.
    pub fn get_child_folder(&self, folder: FolderId, name: &str) -> Option<FolderId> {
        self.folder(folder)
            .child_folders
            .iter()
            .copied()
            .find(|&child| self.folder(child).name == name)
    }

    /// Depth-first search of `folder` and all its descendants for `name`.
    pub fn get_folder(&self, folder: FolderId, name: &str) -> Option<FolderId> {
        if self.folder(folder).name == name {
            return Some(folder);
        }
        self.folder(folder)
            .child_folders
            .iter()
            .find_map(|&child| self.get_folder(child, name))
    }

    /// True if `folder` or any descendant is named `name`.
    pub fn contains_folder_recursive(&self, folder: FolderId, name: &str) -> bool {
        self.get_folder(folder, name).is_some()
    }

    /// Folders from the root down to and including `folder`.
    pub fn folder_chain(&self, folder: FolderId) -> Vec<FolderId> {
        let mut chain = vec![folder];
        let mut current = folder;
        while let Some(parent) = self.folder(current).parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Populate the body of every page under `folder`.
    ///
    /// Stops at the first failing page.
    pub fn populate_children_page_body_properties(
        &mut self,
        folder: FolderId,
        packages: &[PackageDescriptor],
    ) -> Result<(), TreeError> {
        let child_pages = self.folder(folder).child_pages.clone();
        for page_id in child_pages {
            let page = self.page_mut(page_id);
            page.populate_body_properties(packages)
                .map_err(|source| TreeError::PopulatePage {
                    path: page.input_path.clone(),
                    source,
                })?;
        }

        let child_folders = self.folder(folder).child_folders.clone();
        for child in child_folders {
            self.populate_children_page_body_properties(child, packages)?;
        }

        Ok(())
    }

    /// Write every page under `folder` as a full HTML document.
    ///
    /// Stops at the first failing page.
    pub fn write_children_html(
        &self,
        folder: FolderId,
        output_root: &Path,
        ctx: &RenderContext<'_>,
    ) -> Result<(), TreeError> {
        for &page_id in &self.folder(folder).child_pages {
            let page = self.page(page_id);
            page.write_full_page(self, output_root, ctx)
                .map_err(|source| TreeError::WritePage {
                    path: output_root.join(&page.output_path),
                    source,
                })?;
        }

        for &child in &self.folder(folder).child_folders {
            self.write_children_html(child, output_root, ctx)?;
        }

        Ok(())
    }
}

fn join_output_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Normalize a folder path and reject degenerate segments.
fn validate_segments(folder_path: &str) -> Result<Vec<&str>, TreeError> {
    let invalid = |reason| TreeError::InvalidPath {
        path: folder_path.to_string(),
        reason,
    };

    let segments = classify::segments(folder_path);
    if segments.is_empty() {
        return Err(invalid("path is empty"));
    }
    for segment in &segments {
        match *segment {
            "" => return Err(invalid("path contains an empty segment")),
            "." | ".." => return Err(invalid("relative segments are not allowed")),
            _ => {}
        }
    }
    Ok(segments)
}
