//! A single output document.
//!
//! Each markdown file in the input tree becomes one [`Page`]. A page moves
//! through three steps during a generation run:
//!
//! 1. **Discovery** ([`Page::new`]): paths are fixed and a provisional title is
//!    taken from the file stem (`core-concepts.md` → "Core Concepts").
//! 2. **Population** ([`Page::populate_body_properties`]): the markdown source
//!    is read and converted to HTML, the first `# heading` becomes the title,
//!    and the page is matched to its package descriptor.
//! 3. **Writing** ([`Page::write_full_page`]): the shared template wraps the
//!    body with the sidebar for the whole tree and the result goes to disk.
//!
//! ## Output Paths
//!
//! Output paths are relative, slash-delimited, and mirror the input tree with
//! `.md` replaced by `.html`:
//!
//! ```text
//! guides/aws/setup.md  →  guides/aws/setup.html
//! ```

use crate::classify;
use crate::config::SiteConfig;
use crate::naming;
use crate::package::{self, PackageDescriptor};
use crate::template;
use crate::tree::{FolderId, NavTree};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html as md_html};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Page is not attached to the nav tree: {}", .0.display())]
    NotInTree(PathBuf),
}

/// Shared settings for every page written in one run.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    /// Theme stylesheets, relative to the output root (`_assets/css/main.css`).
    pub stylesheets: Vec<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            stylesheets: Vec::new(),
        }
    }

    pub fn with_stylesheets(mut self, stylesheets: Vec<String>) -> Self {
        self.stylesheets = stylesheets;
        self
    }

    pub fn top_level_order(&self) -> &[String] {
        &self.config.nav.top_level_order
    }
}

/// One document in the nav tree.
#[derive(Debug, Clone)]
pub struct Page {
    /// Display and sort key.
    pub title: String,
    /// Markdown path relative to the input root.
    pub input_path: PathBuf,
    /// Where the markdown is read from.
    pub source_path: PathBuf,
    /// Slash-delimited path relative to the output root.
    pub output_path: String,
    /// Set when the page is attached to a folder.
    pub parent: Option<FolderId>,
    /// Rendered markdown, present after population.
    pub body_html: Option<String>,
    /// Package the page belongs to, if it lives under `packages/<name>/`.
    pub package: Option<PackageDescriptor>,
}

impl Page {
    pub fn new(input_path: impl Into<PathBuf>, source_path: impl Into<PathBuf>) -> Self {
        let input_path = input_path.into();
        let output_path = to_slash_path(&input_path.with_extension("html"));
        let title = input_path
            .file_stem()
            .map(|stem| naming::title_from_stem(&stem.to_string_lossy()))
            .unwrap_or_default();

        Self {
            title,
            input_path,
            source_path: source_path.into(),
            output_path,
            parent: None,
            body_html: None,
            package: None,
        }
    }

    /// Directory part of the output path, `None` at the top level.
    pub fn folder_path(&self) -> Option<String> {
        self.output_path
            .rsplit_once('/')
            .map(|(dir, _)| dir.to_string())
    }

    /// Read the markdown source, render its body, and resolve the package.
    pub fn populate_body_properties(
        &mut self,
        packages: &[PackageDescriptor],
    ) -> Result<(), PageError> {
        let markdown = fs::read_to_string(&self.source_path)?;

        if let Some(heading) = naming::first_heading(&markdown) {
            self.title = heading;
        }
        self.body_html = Some(render_markdown(&markdown));
        self.package = classify::package_name(&self.output_path)
            .and_then(|name| package::find_package(packages, name))
            .cloned();

        Ok(())
    }

    /// Render this page with the full sidebar and write it under `output_root`.
    pub fn write_full_page(
        &self,
        tree: &NavTree,
        output_root: &Path,
        ctx: &RenderContext<'_>,
    ) -> Result<(), PageError> {
        let folder = self
            .parent
            .ok_or_else(|| PageError::NotInTree(self.input_path.clone()))?;

        let document = template::render_page(tree, folder, self, ctx);

        let path = output_root.join(&self.output_path);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, document.into_string())?;
        Ok(())
    }

    /// Relative link from this page's location to `other`.
    ///
    /// ```text
    /// guides/aws/setup.html → packages/vpc/overview.html = ../../packages/vpc/overview.html
    /// guides/aws/setup.html → guides/aws/teardown.html   = teardown.html
    /// ```
    pub fn rel_path_to(&self, other: &Page) -> String {
        let from_dir = dir_segments(&self.output_path);
        let target: Vec<&str> = other.output_path.split('/').collect();
        let (target_dir, target_file) = target.split_at(target.len() - 1);

        let common = from_dir
            .iter()
            .zip(target_dir)
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = vec![".."; from_dir.len() - common];
        parts.extend_from_slice(&target_dir[common..]);
        parts.extend_from_slice(target_file);
        parts.join("/")
    }

    /// Prefix leading from this page back to the output root (`../../`).
    pub fn rel_path_to_root(&self) -> String {
        "../".repeat(dir_segments(&self.output_path).len())
    }
}

fn dir_segments(output_path: &str) -> Vec<&str> {
    match output_path.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    }
}

/// Slash-delimited form of a relative path, dropping `.` and root components.
pub(crate) fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Markdown to HTML, with links to sibling `.md` files pointed at their
/// `.html` output.
fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest_url = match rewrite_md_link(&dest_url) {
                Some(rewritten) => CowStr::from(rewritten),
                None => dest_url,
            };
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            })
        }
        other => other,
    });

    let mut body = String::new();
    md_html::push_html(&mut body, parser);
    body
}

/// `setup.md#install` → `setup.html#install`. External links are left alone.
fn rewrite_md_link(dest: &str) -> Option<String> {
    if dest.contains("://") || dest.starts_with("mailto:") || dest.starts_with('#') {
        return None;
    }
    let (path, fragment) = match dest.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (dest, None),
    };
    let stem = path.strip_suffix(".md")?;
    Some(match fragment {
        Some(fragment) => format!("{stem}.html#{fragment}"),
        None => format!("{stem}.html"),
    })
}
