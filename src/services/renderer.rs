//! Renderer: pure mapping from (hierarchy, columns) to a [`DashboardView`].
//!
//! The hierarchy may nest arbitrarily deep; the view clamps the styling
//! tier at [`MAX_RENDER_DEPTH`] but still renders every descendant that has
//! content.

use std::collections::HashSet;

use crate::managers::hierarchy_manager::{Hierarchy, HierarchyTrait};
use crate::services::field_resolver;
use crate::types::bookmark::{Bookmark, List};
use crate::types::config::BookmarkTarget;
use crate::types::view::{BookmarkView, ColumnView, DashboardView, ListView};

/// Deepest styled nesting tier (root = 0).
pub const MAX_RENDER_DEPTH: usize = 2;

/// Presentation options carried from the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub target: BookmarkTarget,
}

/// Builds the view for `columns` of root list ids. Unknown ids are skipped.
pub fn render(hierarchy: &Hierarchy, columns: &[Vec<String>], options: &RenderOptions) -> DashboardView {
    let columns = columns
        .iter()
        .enumerate()
        .map(|(index, ids)| ColumnView {
            index,
            visible: true,
            highlighted: false,
            lists: ids
                .iter()
                .filter_map(|id| hierarchy.get(id))
                .map(|list| render_list(hierarchy, list, 0, options, &mut HashSet::new()))
                .collect(),
        })
        .collect();
    DashboardView { columns }
}

fn render_list(
    hierarchy: &Hierarchy,
    list: &List,
    depth: usize,
    options: &RenderOptions,
    path: &mut HashSet<String>,
) -> ListView {
    path.insert(list.id.clone());
    let mut children = Vec::new();
    for child in hierarchy.children_of(&list.id) {
        if !path.contains(&child.id) && hierarchy.has_content(&child.id) {
            children.push(render_list(hierarchy, child, depth + 1, options, path));
        }
    }
    path.remove(&list.id);

    ListView {
        id: list.id.clone(),
        name: list.name.clone(),
        icon: list.icon.clone(),
        tier: depth.min(MAX_RENDER_DEPTH),
        draggable: depth == 0,
        visible: true,
        bookmarks: list
            .bookmarks
            .iter()
            .map(|b| render_bookmark(b, options))
            .collect(),
        children,
    }
}

/// Resolves title and favicon for display.
pub fn render_bookmark(bookmark: &Bookmark, options: &RenderOptions) -> BookmarkView {
    let title = bookmark.display_title().to_string();
    BookmarkView {
        id: bookmark.id.clone(),
        label: title.clone(),
        tooltip: title,
        url: bookmark.url.clone(),
        favicon: field_resolver::favicon_for(bookmark),
        target: options.target.as_str().to_string(),
        visible: true,
    }
}
