use serde::{Deserialize, Serialize};

/// Rendered dashboard: the visual tree produced by the renderer and mutated
/// only in its visibility and highlight flags afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub index: usize,
    pub visible: bool,
    /// Set while a dragged card hovers over this column.
    pub highlighted: bool,
    pub lists: Vec<ListView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Visual nesting tier, clamped to the deepest styled level.
    pub tier: usize,
    pub draggable: bool,
    pub visible: bool,
    pub bookmarks: Vec<BookmarkView>,
    pub children: Vec<ListView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkView {
    pub id: String,
    /// Text shown in the card. Always the full resolved title; the host may
    /// clip it visually, the view never shortens it.
    pub label: String,
    /// Title attribute shown on hover; equal to `label`.
    pub tooltip: String,
    pub url: String,
    pub favicon: Option<String>,
    pub target: String,
    pub visible: bool,
}

impl DashboardView {
    /// Iterates every list container, root and nested, depth first.
    pub fn lists(&self) -> impl Iterator<Item = &ListView> {
        self.columns
            .iter()
            .flat_map(|c| c.lists.iter())
            .flat_map(ListView::walk)
    }

    pub fn find_list(&self, id: &str) -> Option<&ListView> {
        self.lists().find(|l| l.id == id)
    }

    pub fn find_bookmark(&self, id: &str) -> Option<&BookmarkView> {
        self.lists()
            .flat_map(|l| l.bookmarks.iter())
            .find(|b| b.id == id)
    }

    /// Root list ids per column, in display order.
    pub fn column_ids(&self) -> Vec<Vec<String>> {
        self.columns
            .iter()
            .map(|c| c.lists.iter().map(|l| l.id.clone()).collect())
            .collect()
    }

    /// Marks `column` as the active drop target and clears every other column.
    pub fn set_drop_highlight(&mut self, column: Option<usize>) {
        for c in &mut self.columns {
            c.highlighted = Some(c.index) == column;
        }
    }
}

impl ListView {
    /// This list followed by all of its descendants.
    pub fn walk(&self) -> Box<dyn Iterator<Item = &ListView> + '_> {
        Box::new(std::iter::once(self).chain(self.children.iter().flat_map(ListView::walk)))
    }
}
