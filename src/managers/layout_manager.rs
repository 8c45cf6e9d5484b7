//! Column layout engine for HomeDash.
//!
//! Places root lists into a fixed number of columns. Resolution order is
//! saved column layout, then the legacy flat order, then round-robin over
//! the default order.

use std::collections::HashSet;

use crate::types::errors::ReorderError;
use crate::types::layout::{ColumnLayout, LayoutPreference, ReorderCommand, COLUMN_COUNT};

/// Root list ids per column.
pub type Columns = Vec<Vec<String>>;

/// Assigns `roots` (in default order) to [`COLUMN_COUNT`] columns.
pub fn assign_columns(
    roots: &[String],
    saved_layout: Option<&ColumnLayout>,
    saved_order: Option<&[String]>,
) -> Columns {
    assign_columns_n(COLUMN_COUNT, roots, saved_layout, saved_order)
}

/// Same as [`assign_columns`] with an explicit column count.
///
/// Every id in `roots` lands in exactly one column exactly once. Saved ids
/// that are no longer in `roots` are skipped.
pub fn assign_columns_n(
    column_count: usize,
    roots: &[String],
    saved_layout: Option<&ColumnLayout>,
    saved_order: Option<&[String]>,
) -> Columns {
    let column_count = column_count.max(1);
    let mut columns: Columns = vec![Vec::new(); column_count];
    let mut pool: HashSet<&str> = roots.iter().map(String::as_str).collect();

    if let Some(layout) = saved_layout.filter(|l| !l.is_empty()) {
        for (index, column) in columns.iter_mut().enumerate() {
            for id in layout.column(index) {
                if pool.remove(id.as_str()) {
                    column.push(id.clone());
                }
            }
        }
        let unplaced = roots.iter().filter(|id| pool.contains(id.as_str()));
        distribute(&mut columns, unplaced);
        return columns;
    }

    if let Some(order) = saved_order.filter(|o| !o.is_empty()) {
        let mut sequence: Vec<&String> = Vec::with_capacity(roots.len());
        for id in order {
            if pool.remove(id.as_str()) {
                sequence.push(id);
            }
        }
        sequence.extend(roots.iter().filter(|id| pool.contains(id.as_str())));
        distribute(&mut columns, sequence.into_iter());
        return columns;
    }

    distribute(&mut columns, roots.iter());
    columns
}

/// Appends `ids` round-robin by position index, ignoring column sizes.
fn distribute<'a>(columns: &mut Columns, ids: impl Iterator<Item = &'a String>) {
    let count = columns.len();
    for (i, id) in ids.enumerate() {
        columns[i % count].push(id.clone());
    }
}

/// Assigns columns using a saved preference object.
pub fn assign_from_preference(roots: &[String], preference: &LayoutPreference) -> Columns {
    assign_columns(roots, preference.saved_layout(), preference.saved_order())
}

/// Applies a single move to `columns`, returning the new columns.
///
/// The target index is clamped to the target column's length after removal.
pub fn apply_reorder(columns: &Columns, command: ReorderCommand) -> Result<Columns, ReorderError> {
    let len = columns.len();
    if command.source_column >= len {
        return Err(ReorderError::ColumnOutOfRange(command.source_column));
    }
    if command.target_column >= len {
        return Err(ReorderError::ColumnOutOfRange(command.target_column));
    }

    let mut next = columns.clone();
    let source = &mut next[command.source_column];
    if command.source_index >= source.len() {
        return Err(ReorderError::ColumnOutOfRange(command.source_column));
    }
    let moved = source.remove(command.source_index);

    let target = &mut next[command.target_column];
    let index = command.target_index.min(target.len());
    target.insert(index, moved);
    Ok(next)
}

/// Locates `id` as `(column, index)`.
pub fn position_of(columns: &Columns, id: &str) -> Option<(usize, usize)> {
    columns.iter().enumerate().find_map(|(c, ids)| {
        ids.iter().position(|candidate| candidate == id).map(|i| (c, i))
    })
}
