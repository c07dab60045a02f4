//! Input file classification.
//!
//! Every regular file found by the walk is one of:
//!
//! - **Page**: `.md` / `.markdown`, rendered into the nav tree.
//! - **Asset**: an extension from `files.asset_extensions`, copied verbatim to
//!   the same relative path in the output.
//!
//! Anything else does not match and is reported as [`FileError::Unmatched`].
//! The generation run skips those files with a warning.

use std::path::{Path, PathBuf};
use thiserror::Error;

const PAGE_EXTENSIONS: &[&str] = &["md", "markdown"];

#[derive(Error, Debug)]
pub enum FileError {
    #[error("File {} is neither a markdown page nor a known asset type", .0.display())]
    Unmatched(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Page,
    Asset,
}

/// Decide what to do with the file at `rel_path` (relative to the input root).
pub fn classify_file(rel_path: &Path, asset_extensions: &[String]) -> Result<FileKind, FileError> {
    let ext = rel_path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if PAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(FileKind::Page)
    } else if !ext.is_empty() && asset_extensions.iter().any(|a| a.eq_ignore_ascii_case(&ext)) {
        Ok(FileKind::Asset)
    } else {
        Err(FileError::Unmatched(rel_path.to_path_buf()))
    }
}
