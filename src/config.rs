//! Site configuration module.
//!
//! Handles loading, validating, and merging `docsite.toml`. The file lives in
//! the input root, is optional, and only needs the keys it overrides: user
//! values are merged on top of the stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Documentation"     # Sidebar heading and <title> suffix
//!
//! [nav]
//! # Top-level folders listed first in the sidebar, in this order.
//! # Folders not listed follow in alphabetical order.
//! top_level_order = ["introduction", "guides", "packages"]
//!
//! [files]
//! # Glob patterns (relative to the input root) that are skipped entirely.
//! exclude = [".git/**", "**/.DS_Store"]
//! # Non-markdown files with these extensions are copied to the output.
//! asset_extensions = ["png", "jpg", "jpeg", "gif", "svg", "ico", "pdf", "txt", "css", "js"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::ordering::DEFAULT_TOP_LEVEL_ORDER;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the input root.
pub const CONFIG_FILE_NAME: &str = "docsite.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid exclude pattern: {0}")]
    Glob(#[from] glob::PatternError),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `docsite.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub nav: NavConfig,
    pub files: FilesConfig,
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for name in &self.nav.top_level_order {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "nav.top_level_order lists {name:?} more than once"
                )));
            }
        }
        if self.files.asset_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "files.asset_extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .files
            .asset_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "files.asset_extensions entries must be bare extensions, got {ext:?}"
            )));
        }
        self.exclude_patterns()?;
        Ok(())
    }

    /// Compiled `files.exclude` globs.
    pub fn exclude_patterns(&self) -> Result<Vec<Pattern>, ConfigError> {
        self.files
            .exclude
            .iter()
            .map(|p| Pattern::new(p).map_err(ConfigError::from))
            .collect()
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Shown at the top of the sidebar and appended to every `<title>`.
    pub title: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Documentation".to_string(),
        }
    }
}

/// Sidebar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Root folders pinned to the top of the sidebar, in this order.
    pub top_level_order: Vec<String>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            top_level_order: DEFAULT_TOP_LEVEL_ORDER
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Input file handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    /// Glob patterns, relative to the input root, skipped by the walk.
    pub exclude: Vec<String>,
    /// Extensions (without dot) of files copied verbatim.
    pub asset_extensions: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            exclude: vec![".git/**".to_string(), "**/.DS_Store".to_string()],
            asset_extensions: [
                "png", "jpg", "jpeg", "gif", "svg", "ico", "pdf", "txt", "css", "js",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// `SiteConfig::default()` as a TOML table, the base every user file
/// is laid over.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Lay `overlay` over `base` in place. Tables merge per key; any other
/// value in `overlay` wins outright (arrays are not concatenated).
pub fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Parsed `docsite.toml` of `input_root`; `None` when there is no such file.
pub fn read_config_file(input_root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    match fs::read_to_string(input_root.join(CONFIG_FILE_NAME)) {
        Ok(text) => Ok(Some(toml::from_str(&text)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Site config for `input_root`: stock defaults, the user's file on top,
/// validated.
pub fn load_config(input_root: &Path) -> Result<SiteConfig, ConfigError> {
    let mut value = stock_defaults_value()?;
    if let Some(user) = read_config_file(input_root)? {
        merge_toml(&mut value, user);
    }
    let config: SiteConfig = value.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Commented `docsite.toml` listing every default, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# docsite configuration
# =====================
# Place this file in the root of the input directory as docsite.toml.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Shown at the top of the sidebar and appended to every page title.
title = "Documentation"

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[nav]
# Top-level folders listed first in the sidebar, in this order.
# Top-level folders not listed here follow in alphabetical order.
top_level_order = ["introduction", "guides", "packages"]

# ---------------------------------------------------------------------------
# Input files
# ---------------------------------------------------------------------------
[files]
# Glob patterns, relative to the input directory, that are skipped entirely.
# Patterns given with --exclude on the command line are added to these.
exclude = [".git/**", "**/.DS_Store"]

# Non-markdown files with these extensions are copied to the output as is.
# Any other non-markdown file is skipped with a warning.
asset_extensions = ["png", "jpg", "jpeg", "gif", "svg", "ico", "pdf", "txt", "css", "js"]
"##
}
