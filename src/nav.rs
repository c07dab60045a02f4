//! Sidebar navigation HTML.
//!
//! Every page embeds the whole tree as nested lists. For a tree like
//!
//! ```text
//! guides/
//!   aws/setup.md
//! packages/
//!   module-vpc/
//!     overview.md
//!     modules/vpc-app/core-concepts.md
//! ```
//!
//! the fragment looks like (whitespace added):
//!
//! ```text
//! <ul>
//!   <li class="folder top_level_folder"><a href="#">Guides</a>
//!     <ul>
//!       <li class="folder"><a href="#">Aws</a>
//!         <ul class="hidden"><li class="page"><a href="...">Setup</a></li></ul>
//!       </li>
//!     </ul>
//!   </li>
//!   <li class="folder top_level_folder"><a href="#">Packages</a>
//!     <ul>
//!       <li class="folder package_folder"><a href="#">Module Vpc</a>
//!         <ul class="hidden">...overview...</ul>
//!         <ul class="hidden">...modules/vpc-app...</ul>
//!       </li>
//!     </ul>
//!   </li>
//! </ul>
//! ```
//!
//! Rules:
//!
//! - Package folders hide their sub-folder list; every page list is hidden.
//!   `static/nav.js` expands the branch leading to the active page.
//! - Folder names are humanized except for module folders.
//! - Role classes concatenate: `top_level_folder`, `package_folder`,
//!   `module_folder`.
//! - The active page is highlighted and not linked; other pages link relative
//!   to the active page.
//!
//! Rendering reads the tree only. Sorting happens on copies (see
//! [`crate::ordering`]).

use crate::naming::display_name;
use crate::ordering;
use crate::page::Page;
use crate::tree::{Folder, FolderId, NavTree};
use maud::{Markup, html};

/// Sidebar for the whole tree, as seen from `active`.
///
/// `active` must be a page stored in `tree`; it is matched by identity.
pub fn render_nav(tree: &NavTree, active: &Page, top_level_order: &[String]) -> Markup {
    render_folder(tree, tree.root(), active, top_level_order)
}

/// Child folder list of `folder_id`, recursively.
fn render_folder(
    tree: &NavTree,
    folder_id: FolderId,
    active: &Page,
    top_level_order: &[String],
) -> Markup {
    let folder = tree.folder(folder_id);
    let child_folders = if folder.is_root {
        ordering::reorder_top_level_folders(tree, &folder.child_folders, top_level_order)
    } else {
        ordering::sort_folders(tree, &folder.child_folders)
    };

    html! {
        @if !child_folders.is_empty() {
            ul class=[folder.is_package_folder.then_some("hidden")] {
                @for &child_id in &child_folders {
                    (render_child_folder(tree, folder, child_id, active, top_level_order))
                }
            }
        }
    }
}

fn render_child_folder(
    tree: &NavTree,
    parent: &Folder,
    child_id: FolderId,
    active: &Page,
    top_level_order: &[String],
) -> Markup {
    let child = tree.folder(child_id);
    let pages = ordering::sort_pages(tree, &child.child_pages);

    html! {
        li class=(folder_classes(parent, child)) {
            a href="#" { (folder_display_name(child)) }
            @if !pages.is_empty() {
                ul.hidden {
                    @for &page_id in &pages {
                        (render_page_item(tree.page(page_id), active))
                    }
                }
            }
            (render_folder(tree, child_id, active, top_level_order))
        }
    }
}

fn render_page_item(page: &Page, active: &Page) -> Markup {
    let title = page_display_name(page);
    html! {
        li.page {
            @if std::ptr::eq(page, active) {
                a.active href="#" { (title) }
            } @else {
                a href=(active.rel_path_to(page)) { (title) }
            }
        }
    }
}

/// Page title as shown in the sidebar and breadcrumb.
pub fn page_display_name(page: &Page) -> String {
    display_name(&page.title)
}

/// Module folders keep their name as written; everything else is humanized.
pub fn folder_display_name(folder: &Folder) -> String {
    if folder.is_module_folder {
        folder.name.clone()
    } else {
        display_name(&folder.name)
    }
}

fn folder_classes(parent: &Folder, child: &Folder) -> String {
    let mut classes = String::from("folder");
    if parent.is_root {
        classes.push_str(" top_level_folder");
    }
    if child.is_package_folder {
        classes.push_str(" package_folder");
    }
    if child.is_module_folder {
        classes.push_str(" module_folder");
    }
    classes
}
