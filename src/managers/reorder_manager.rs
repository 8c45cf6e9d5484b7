//! Drag reorder controller for HomeDash.
//!
//! Tracks a single drag gesture on a root list card and turns its drop into
//! an explicit [`ReorderCommand`]. Nested lists are never draggable.

use crate::managers::layout_manager::{self, Columns};
use crate::types::errors::ReorderError;
use crate::types::layout::ReorderCommand;

/// Trait defining the drag gesture interface.
pub trait DragControllerTrait {
    fn start(&mut self, list_id: &str, columns: &Columns) -> Result<(), ReorderError>;
    fn enter(&mut self, column: usize);
    fn leave(&mut self, column: usize);
    fn drop_on(&mut self, target: Option<(usize, usize)>, columns: &Columns) -> Option<ReorderCommand>;
    fn end(&mut self);
    fn highlighted(&self) -> Option<usize>;
    fn dragging(&self) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveDrag {
    list_id: String,
    source_column: usize,
    source_index: usize,
}

/// Single-gesture drag state.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
    highlighted: Option<usize>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DragControllerTrait for DragController {
    /// Begins dragging `list_id`, which must be a root list placed in `columns`.
    fn start(&mut self, list_id: &str, columns: &Columns) -> Result<(), ReorderError> {
        if let Some(active) = &self.active {
            return Err(ReorderError::DragInProgress(active.list_id.clone()));
        }
        let (source_column, source_index) = layout_manager::position_of(columns, list_id)
            .ok_or_else(|| ReorderError::NotDraggable(list_id.to_string()))?;
        self.active = Some(ActiveDrag {
            list_id: list_id.to_string(),
            source_column,
            source_index,
        });
        Ok(())
    }

    /// Marks `column` as receiving the dragged card. Empty columns qualify.
    fn enter(&mut self, column: usize) {
        if self.active.is_some() {
            self.highlighted = Some(column);
        }
    }

    fn leave(&mut self, column: usize) {
        if self.highlighted == Some(column) {
            self.highlighted = None;
        }
    }

    /// Finishes the gesture at `target` (`(column, index)` in the target column
    /// after the card is lifted out). Returns `None` for a drop outside any
    /// column, onto the card's own slot, or with no active drag.
    fn drop_on(&mut self, target: Option<(usize, usize)>, columns: &Columns) -> Option<ReorderCommand> {
        let active = self.active.take();
        self.highlighted = None;

        let active = active?;
        let (target_column, target_index) = target?;
        if target_column >= columns.len() {
            return None;
        }

        // The card may have been re-rendered elsewhere since the gesture began.
        let (source_column, source_index) =
            layout_manager::position_of(columns, &active.list_id)
                .unwrap_or((active.source_column, active.source_index));

        let target_len = if target_column == source_column {
            columns[target_column].len().saturating_sub(1)
        } else {
            columns[target_column].len()
        };
        let target_index = target_index.min(target_len);

        if target_column == source_column && target_index == source_index {
            return None;
        }

        Some(ReorderCommand {
            source_column,
            source_index,
            target_column,
            target_index,
        })
    }

    /// Cancels the gesture without a move.
    fn end(&mut self) {
        self.active = None;
        self.highlighted = None;
    }

    fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    fn dragging(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.list_id.as_str())
    }
}
