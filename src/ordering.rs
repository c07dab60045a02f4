//! Sidebar ordering rules.
//!
//! - Folders sort by name, case-sensitive.
//! - Root folders follow the pinned top-level order first, then the rest by name.
//! - Pages sort by title, with `Overview` always first.
//!
//! Every function returns a fresh, sorted copy of the ids it is given. The
//! child lists stored in the tree keep their insertion order, so rendering
//! never mutates the tree.

use crate::tree::{FolderId, NavTree, PageId};
use std::cmp::Ordering;

/// Page title that always sorts first among its siblings.
pub const OVERVIEW_TITLE: &str = "Overview";

/// Top-level folders shown first at the root, in this order.
pub const DEFAULT_TOP_LEVEL_ORDER: &[&str] = &["introduction", "guides", "packages"];

/// Folders sorted by name.
pub fn sort_folders(tree: &NavTree, folders: &[FolderId]) -> Vec<FolderId> {
    let mut sorted = folders.to_vec();
    sorted.sort_by(|&a, &b| tree.folder(a).name.cmp(&tree.folder(b).name));
    sorted
}

/// Root folders: pinned names first in `top_level_order`, then everything
/// else by name.
pub fn reorder_top_level_folders(
    tree: &NavTree,
    folders: &[FolderId],
    top_level_order: &[String],
) -> Vec<FolderId> {
    let mut sorted = folders.to_vec();
    sorted.sort_by_key(|&id| {
        let name = tree.folder(id).name.as_str();
        let rank = top_level_order
            .iter()
            .position(|pinned| pinned == name)
            .unwrap_or(usize::MAX);
        (rank, name)
    });
    sorted
}

/// Pages sorted by title with `Overview` first. Stable for equal titles.
pub fn sort_pages(tree: &NavTree, pages: &[PageId]) -> Vec<PageId> {
    let mut sorted = pages.to_vec();
    sorted.sort_by(|&a, &b| compare_page_titles(&tree.page(a).title, &tree.page(b).title));
    sorted
}

/// Title comparison used for pages.
pub fn compare_page_titles(a: &str, b: &str) -> Ordering {
    (a != OVERVIEW_TITLE, a).cmp(&(b != OVERVIEW_TITLE, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::tree::Folder;

    fn pinned(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn folders_sort_case_sensitively() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let ids: Vec<_> = ["beta", "Alpha", "alpha"]
            .iter()
            .map(|n| tree.add_folder(root, Folder::new(*n, *n)))
            .collect();

        let sorted = sort_folders(&tree, &ids);
        assert_eq!(folder_names(&tree, &sorted), vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn pinned_folder_comes_first() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let ids: Vec<_> = ["zebra", "apple"]
            .iter()
            .map(|n| tree.add_folder(root, Folder::new(*n, *n)))
            .collect();

        let sorted = reorder_top_level_folders(&tree, &ids, &pinned(&["apple"]));
        assert_eq!(folder_names(&tree, &sorted), vec!["apple", "zebra"]);
    }

    #[test]
    fn pinned_order_wins_over_name_order() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let ids: Vec<_> = ["misc", "packages", "guides", "archive", "introduction"]
            .iter()
            .map(|n| tree.add_folder(root, Folder::new(*n, *n)))
            .collect();

        let sorted = reorder_top_level_folders(
            &tree,
            &ids,
            &pinned(&["introduction", "guides", "packages"]),
        );
        assert_eq!(
            folder_names(&tree, &sorted),
            vec!["introduction", "guides", "packages", "archive", "misc"]
        );
    }

    #[test]
    fn pinned_names_missing_from_tree_are_ignored() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let ids: Vec<_> = ["b", "a"]
            .iter()
            .map(|n| tree.add_folder(root, Folder::new(*n, *n)))
            .collect();

        let sorted = reorder_top_level_folders(&tree, &ids, &pinned(&["ghost", "b"]));
        assert_eq!(folder_names(&tree, &sorted), vec!["b", "a"]);
    }

    #[test]
    fn empty_pinned_order_is_plain_name_order() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let ids: Vec<_> = ["c", "a", "b"]
            .iter()
            .map(|n| tree.add_folder(root, Folder::new(*n, *n)))
            .collect();

        let sorted = reorder_top_level_folders(&tree, &ids, &[]);
        assert_eq!(folder_names(&tree, &sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn overview_page_sorts_first() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let ids: Vec<_> = ["Zeta", "Overview", "Beta"]
            .iter()
            .map(|t| tree.add_page(root, titled_page(t)))
            .collect();

        let sorted = sort_pages(&tree, &ids);
        assert_eq!(page_titles(&tree, &sorted), vec!["Overview", "Beta", "Zeta"]);
    }

    #[test]
    fn overview_beats_titles_that_sort_earlier() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let ids: Vec<_> = ["Architecture", "Overview", "API"]
            .iter()
            .map(|t| tree.add_page(root, titled_page(t)))
            .collect();

        let sorted = sort_pages(&tree, &ids);
        assert_eq!(
            page_titles(&tree, &sorted),
            vec!["Overview", "API", "Architecture"]
        );
    }

    #[test]
    fn duplicate_overviews_keep_insertion_order() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let first = tree.add_page(root, titled_page("Overview"));
        let other = tree.add_page(root, titled_page("Alpha"));
        let second = tree.add_page(root, titled_page("Overview"));

        let sorted = sort_pages(&tree, &[first, other, second]);
        assert_eq!(sorted, vec![first, second, other]);
    }

    #[test]
    fn sorting_leaves_tree_untouched() {
        let mut tree = NavTree::new();
        let root = tree.root();
        for t in ["b", "a"] {
            tree.add_page(root, titled_page(t));
        }
        let stored = tree.folder(root).child_pages.clone();
        sort_pages(&tree, &stored);
        assert_eq!(tree.folder(root).child_pages, stored);
    }

    #[test]
    fn compare_is_case_sensitive_after_overview() {
        assert_eq!(compare_page_titles("Overview", "Overview"), Ordering::Equal);
        assert_eq!(compare_page_titles("Overview", "A"), Ordering::Less);
        assert_eq!(compare_page_titles("a", "Overview"), Ordering::Greater);
        assert_eq!(compare_page_titles("B", "a"), Ordering::Less);
        assert_eq!(compare_page_titles("overview", "Overview"), Ordering::Greater);
    }
}
