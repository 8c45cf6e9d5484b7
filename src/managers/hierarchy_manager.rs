//! Hierarchy builder for HomeDash.
//!
//! Turns the flat list and bookmark rows into an arena of [`List`] nodes
//! keyed by id. Parent links are ids, so the tree may be arbitrarily deep;
//! display depth is the renderer's concern.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::services::field_resolver;
use crate::types::bookmark::{Bookmark, List, RawBookmark, RawList};

/// Trait defining read access to a built hierarchy.
pub trait HierarchyTrait {
    fn get(&self, id: &str) -> Option<&List>;
    fn children_of(&self, id: &str) -> Vec<&List>;
    fn has_content(&self, id: &str) -> bool;
    fn root_lists(&self) -> Vec<&List>;
    fn list_count(&self) -> usize;
    fn bookmark_count(&self) -> usize;
}

/// Rooted forest of lists plus their bookmarks.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    lists: HashMap<String, List>,
    /// List ids in source order.
    order: Vec<String>,
}

impl Hierarchy {
    /// Builds the hierarchy from raw rows.
    ///
    /// Lists whose parent is unknown and bookmarks whose list is unknown are
    /// dropped without error. A bookmark id seen twice keeps its first list.
    pub fn build(list_rows: &[RawList], bookmark_rows: &[RawBookmark]) -> Self {
        let mut lists: HashMap<String, List> = HashMap::with_capacity(list_rows.len());
        let mut order = Vec::with_capacity(list_rows.len());

        for row in list_rows {
            if row.id.is_empty() || lists.contains_key(&row.id) {
                continue;
            }
            lists.insert(row.id.clone(), List::from_raw(row));
            order.push(row.id.clone());
        }

        let mut orphaned_lists = 0usize;
        for id in &order {
            let parent = match lists.get(id).and_then(|l| l.parent_id.clone()) {
                Some(p) => p,
                None => continue,
            };
            match lists.get_mut(&parent) {
                Some(parent_list) => parent_list.children.push(id.clone()),
                None => orphaned_lists += 1,
            }
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(bookmark_rows.len());
        let mut dropped_bookmarks = 0usize;
        for row in bookmark_rows {
            if !seen.insert(row.id.as_str()) {
                continue;
            }
            let owner = row
                .list_id
                .as_deref()
                .and_then(|list_id| lists.get_mut(list_id));
            match owner {
                Some(list) => {
                    let bookmark = field_resolver::to_bookmark(row, &list.id);
                    list.bookmarks.push(bookmark);
                }
                None => dropped_bookmarks += 1,
            }
        }

        for list in lists.values_mut() {
            list.bookmarks.sort_by(compare_titles);
        }

        if orphaned_lists > 0 || dropped_bookmarks > 0 {
            debug!(
                orphaned_lists,
                dropped_bookmarks, "ignored rows referencing unknown lists"
            );
        }

        Self { lists, order }
    }

    /// Walks `id` and its descendants, skipping ids already visited so a
    /// malformed parent cycle cannot loop.
    fn any_descendant(&self, id: &str, visited: &mut HashSet<String>) -> bool {
        if !visited.insert(id.to_string()) {
            return false;
        }
        let list = match self.lists.get(id) {
            Some(l) => l,
            None => return false,
        };
        if !list.bookmarks.is_empty() {
            return true;
        }
        list.children
            .iter()
            .any(|child| self.any_descendant(child, visited))
    }
}

impl HierarchyTrait for Hierarchy {
    fn get(&self, id: &str) -> Option<&List> {
        self.lists.get(id)
    }

    /// Direct children in source order.
    fn children_of(&self, id: &str) -> Vec<&List> {
        self.lists
            .get(id)
            .map(|l| l.children.iter().filter_map(|c| self.lists.get(c)).collect())
            .unwrap_or_default()
    }

    /// True if the list or any descendant owns at least one bookmark.
    /// Evaluated on every call; nothing is cached on the node.
    fn has_content(&self, id: &str) -> bool {
        self.any_descendant(id, &mut HashSet::new())
    }

    /// Parentless lists with content, in source order.
    fn root_lists(&self) -> Vec<&List> {
        self.order
            .iter()
            .filter_map(|id| self.lists.get(id))
            .filter(|l| l.is_root() && self.has_content(&l.id))
            .collect()
    }

    fn list_count(&self) -> usize {
        self.lists.len()
    }

    fn bookmark_count(&self) -> usize {
        self.lists.values().map(|l| l.bookmarks.len()).sum()
    }
}

/// Ascending by display title, case-folded; ties fall back to the raw title
/// and then the id so the order is total.
fn compare_titles(a: &Bookmark, b: &Bookmark) -> Ordering {
    let (ta, tb) = (a.display_title(), b.display_title());
    ta.to_lowercase()
        .cmp(&tb.to_lowercase())
        .then_with(|| ta.cmp(tb))
        .then_with(|| a.id.cmp(&b.id))
}
