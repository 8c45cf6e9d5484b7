//! Dashboard Manager for HomeDash.
//!
//! Single owner of the loaded hierarchy, the layout preference, the resolved
//! columns and the rendered view. Drag and search feed back into it; nothing
//! else mutates that state.

use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, info};

use crate::managers::hierarchy_manager::{Hierarchy, HierarchyTrait};
use crate::managers::layout_manager::{self, Columns};
use crate::managers::reorder_manager::{DragController, DragControllerTrait};
use crate::managers::search_manager::{self, SearchDebouncer};
use crate::services::preferences_client::LayoutPersistence;
use crate::services::renderer::{self, RenderOptions};
use crate::types::bookmark::{RawBookmark, RawList};
use crate::types::errors::ReorderError;
use crate::types::layout::{ColumnLayout, LayoutPreference, ReorderCommand, COLUMN_COUNT};
use crate::types::view::DashboardView;

/// Where a dragged card was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Inside column `column`, at final position `index`.
    Column { column: usize, index: usize },
    /// Outside every column.
    Outside,
}

/// Top-level dashboard controller.
pub struct DashboardManager {
    hierarchy: Hierarchy,
    preference: LayoutPreference,
    columns: Columns,
    view: DashboardView,
    options: RenderOptions,
    drag: DragController,
    debouncer: SearchDebouncer,
    query: String,
    /// Bookmarks whose favicon failed to load; hidden again after every render.
    broken_favicons: HashSet<String>,
    persistence: LayoutPersistence,
}

impl DashboardManager {
    /// Creates an empty dashboard starting from `preference`.
    pub fn new(preference: LayoutPreference, options: RenderOptions, persistence: LayoutPersistence) -> Self {
        Self {
            hierarchy: Hierarchy::default(),
            preference,
            columns: vec![Vec::new(); COLUMN_COUNT],
            view: DashboardView::default(),
            options,
            drag: DragController::new(),
            debouncer: SearchDebouncer::default(),
            query: String::new(),
            broken_favicons: HashSet::new(),
            persistence,
        }
    }

    /// Replaces the data snapshot and lays it out against the current preference.
    pub fn load(&mut self, lists: &[RawList], bookmarks: &[RawBookmark]) -> &DashboardView {
        self.hierarchy = Hierarchy::build(lists, bookmarks);
        self.broken_favicons.clear();
        let roots = self.relayout();
        info!(
            lists = self.hierarchy.list_count(),
            bookmarks = self.hierarchy.bookmark_count(),
            roots,
            "dashboard loaded"
        );
        &self.view
    }

    /// Adopts a preference saved elsewhere and lays the current data out again.
    pub fn set_preference(&mut self, preference: LayoutPreference) -> &DashboardView {
        self.preference = preference;
        self.relayout();
        &self.view
    }

    fn relayout(&mut self) -> usize {
        let roots: Vec<String> = self
            .hierarchy
            .root_lists()
            .into_iter()
            .map(|l| l.id.clone())
            .collect();
        self.columns = layout_manager::assign_from_preference(&roots, &self.preference);
        self.drag.end();
        self.rerender();
        roots.len()
    }

    fn rerender(&mut self) {
        self.view = renderer::render(&self.hierarchy, &self.columns, &self.options);
        for id in &self.broken_favicons {
            hide_favicon_in_view(&mut self.view, id);
        }
        if !self.query.trim().is_empty() {
            search_manager::filter(&mut self.view, &self.query);
        }
        self.view.set_drop_highlight(self.drag.highlighted());
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn preference(&self) -> &LayoutPreference {
        &self.preference
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Runs a filter pass now, superseding any pending keystroke.
    pub fn search(&mut self, query: &str) -> &DashboardView {
        self.debouncer.cancel();
        self.query = query.to_string();
        search_manager::filter(&mut self.view, query);
        &self.view
    }

    /// Records a keystroke; the pass runs on a later [`Self::search_poll`].
    pub fn search_input(&mut self, query: &str, now: Instant) {
        self.debouncer.input(query, now);
    }

    /// Runs the pending filter pass if it has settled. Returns whether it ran.
    pub fn search_poll(&mut self, now: Instant) -> bool {
        match self.debouncer.take_due(now) {
            Some(query) => {
                self.search(&query);
                true
            }
            None => false,
        }
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn drag_start(&mut self, list_id: &str) -> Result<(), ReorderError> {
        self.drag.start(list_id, &self.columns)
    }

    pub fn drag_enter(&mut self, column: usize) -> Result<(), ReorderError> {
        if column >= self.columns.len() {
            return Err(ReorderError::ColumnOutOfRange(column));
        }
        self.drag.enter(column);
        self.view.set_drop_highlight(self.drag.highlighted());
        Ok(())
    }

    pub fn drag_leave(&mut self, column: usize) {
        self.drag.leave(column);
        self.view.set_drop_highlight(self.drag.highlighted());
    }

    /// Cancels the gesture; nothing moves and nothing is saved.
    pub fn drag_end(&mut self) {
        self.drag.end();
        self.view.set_drop_highlight(None);
    }

    /// Completes the gesture. Returns the applied command, or `None` for a
    /// no-op drop, in which case nothing is persisted.
    pub fn drop_card(&mut self, target: DropTarget) -> Result<Option<ReorderCommand>, ReorderError> {
        let target = match target {
            DropTarget::Column { column, index } => Some((column, index)),
            DropTarget::Outside => None,
        };
        let command = self.drag.drop_on(target, &self.columns);
        self.view.set_drop_highlight(None);

        let command = match command {
            Some(c) => c,
            None => {
                debug!("drop ignored");
                return Ok(None);
            }
        };
        self.apply(command)?;
        Ok(Some(command))
    }

    /// Applies a reorder command directly and persists the new layout.
    pub fn apply(&mut self, command: ReorderCommand) -> Result<(), ReorderError> {
        self.columns = layout_manager::apply_reorder(&self.columns, command)?;
        self.preference = self
            .persistence
            .save(ColumnLayout::from_columns(&self.columns));
        self.rerender();
        Ok(())
    }

    /// Hides the favicon of a bookmark whose image failed to load. The
    /// favicon stays hidden across drags and relayouts until the next load.
    pub fn mark_favicon_broken(&mut self, bookmark_id: &str) -> bool {
        let found = hide_favicon_in_view(&mut self.view, bookmark_id);
        if found {
            self.broken_favicons.insert(bookmark_id.to_string());
        }
        found
    }
}

fn hide_favicon_in_view(view: &mut DashboardView, bookmark_id: &str) -> bool {
    let mut found = false;
    for column in &mut view.columns {
        for root in &mut column.lists {
            found |= hide_favicon(root, bookmark_id);
        }
    }
    found
}

fn hide_favicon(list: &mut crate::types::view::ListView, bookmark_id: &str) -> bool {
    let mut found = false;
    for bookmark in &mut list.bookmarks {
        if bookmark.id == bookmark_id {
            bookmark.favicon = None;
            found = true;
        }
    }
    for child in &mut list.children {
        found |= hide_favicon(child, bookmark_id);
    }
    found
}
