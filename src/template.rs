//! The shared page template.
//!
//! Every page is the same document shell around its own body:
//!
//! ```text
//! <head>   title, embedded base CSS, theme stylesheets, favicon
//! <body>
//!   aside.sidebar     site title link + nav tree (see crate::nav)
//!   main.content      breadcrumb, package banner, rendered markdown
//!   <script>          expands the sidebar branch of the active page
//! ```
//!
//! All links to site assets are relative, so the output directory can be
//! served from any sub-path or opened straight from disk.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/); interpolated
//! values are escaped.

use crate::nav;
use crate::page::{Page, RenderContext};
use crate::tree::{FolderId, NavTree};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/nav.js");

/// Full HTML document for `page`, which lives in `folder`.
pub fn render_page(
    tree: &NavTree,
    folder: FolderId,
    page: &Page,
    ctx: &RenderContext<'_>,
) -> Markup {
    let to_root = page.rel_path_to_root();
    let site_title = &ctx.config.site.title;
    let page_name = nav::page_display_name(page);
    let document_title = if page_name.is_empty() {
        site_title.clone()
    } else {
        format!("{} · {}", page_name, site_title)
    };

    let content = html! {
        aside.sidebar {
            a.site-title href={ (to_root) "index.html" } { (site_title) }
            nav.site-nav {
                (nav::render_nav(tree, page, ctx.top_level_order()))
            }
        }
        main.content {
            (breadcrumb(tree, folder, page))
            @if let Some(package) = &page.package {
                (package_banner(package))
            }
            article.page-body {
                @if let Some(body) = &page.body_html {
                    (PreEscaped(body))
                }
            }
        }
        script { (PreEscaped(JS)) }
    };

    base_document(&document_title, &to_root, &ctx.stylesheets, content)
}

/// Renders the base HTML document structure
fn base_document(title: &str, to_root: &str, stylesheets: &[String], content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="icon" href={ (to_root) "favicon.ico" };
                style { (PreEscaped(CSS_STATIC)) }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href={ (to_root) (stylesheet) };
                }
            }
            body {
                (content)
            }
        }
    }
}

/// Folder trail from the top level down to the page.
fn breadcrumb(tree: &NavTree, folder: FolderId, page: &Page) -> Markup {
    let trail: Vec<String> = tree
        .folder_chain(folder)
        .into_iter()
        .map(|id| tree.folder(id))
        .filter(|f| !f.is_root)
        .map(nav::folder_display_name)
        .collect();

    html! {
        nav.breadcrumb {
            @for name in &trail {
                span.crumb { (name) }
                " › "
            }
            span.crumb.current { (nav::page_display_name(page)) }
        }
    }
}

fn package_banner(package: &crate::package::PackageDescriptor) -> Markup {
    html! {
        div.package-banner {
            span.package-name { (package.title.as_deref().unwrap_or(&package.name)) }
            @if let Some(description) = &package.description {
                ": "
                span.package-description { (description) }
            }
            @if let Some(url) = &package.url {
                " "
                a.package-source href=(url) { "View source" }
            }
        }
    }
}
