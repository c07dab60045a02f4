//! Package descriptors loaded from the packages manifest.
//!
//! The manifest is a JSON array describing every documented package:
//!
//! ```json
//! [
//!   {
//!     "name": "module-vpc",
//!     "title": "VPC",
//!     "description": "Best-practices VPC setup",
//!     "url": "https://github.com/example/module-vpc"
//!   }
//! ]
//! ```
//!
//! Only `name` is required. It must match the folder name under `packages/`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Packages manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metadata for one documented package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Folder name under `packages/`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source repository, linked from every page of the package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Parse a packages manifest from JSON text.
pub fn parse_packages(json: &str) -> Result<Vec<PackageDescriptor>, PackageError> {
    Ok(serde_json::from_str(json)?)
}

/// Load the packages manifest. No path means no packages.
pub fn load_packages(path: Option<&Path>) -> Result<Vec<PackageDescriptor>, PackageError> {
    match path {
        Some(path) => parse_packages(&fs::read_to_string(path)?),
        None => Ok(Vec::new()),
    }
}

/// Look up a package by folder name.
pub fn find_package<'a>(
    packages: &'a [PackageDescriptor],
    name: &str,
) -> Option<&'a PackageDescriptor> {
    packages.iter().find(|p| p.name == name)
}
