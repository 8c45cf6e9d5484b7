use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of display columns on the dashboard.
pub const COLUMN_COUNT: usize = 4;

/// Column index → ordered root list ids.
///
/// Serialized as a JSON object keyed by the column index as a string
/// (`{"0": ["a", "b"], "1": []}`), which is how older saved state looks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnLayout(pub BTreeMap<usize, Vec<String>>);

impl ColumnLayout {
    /// Builds a layout from resolved columns, one entry per column.
    pub fn from_columns(columns: &[Vec<String>]) -> Self {
        Self(
            columns
                .iter()
                .enumerate()
                .map(|(i, ids)| (i, ids.clone()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn column(&self, index: usize) -> &[String] {
        self.0.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Concatenation of every column in column-index order.
    pub fn flatten(&self) -> Vec<String> {
        self.0.values().flat_map(|ids| ids.iter().cloned()).collect()
    }
}

/// Persisted layout state. `column_layout` is authoritative; `column_order`
/// is derived from it and kept only for older saved state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPreference {
    #[serde(default)]
    pub column_order: Vec<String>,
    #[serde(default)]
    pub column_layout: ColumnLayout,
}

impl LayoutPreference {
    /// Derives the full preference object from a column layout.
    pub fn from_layout(column_layout: ColumnLayout) -> Self {
        Self {
            column_order: column_layout.flatten(),
            column_layout,
        }
    }

    pub fn saved_layout(&self) -> Option<&ColumnLayout> {
        (!self.column_layout.is_empty()).then_some(&self.column_layout)
    }

    pub fn saved_order(&self) -> Option<&[String]> {
        (!self.column_order.is_empty()).then_some(self.column_order.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.column_layout.is_empty() && self.column_order.is_empty()
    }
}

/// A single move of a root list card, produced by the drag controller.
///
/// `target_index` is the card's final position in the target column after
/// it has been removed from its source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderCommand {
    pub source_column: usize,
    pub source_index: usize,
    pub target_column: usize,
    pub target_index: usize,
}
