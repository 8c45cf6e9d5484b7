//! Search filter for HomeDash.
//!
//! Toggles visibility flags on a rendered [`DashboardView`]; never removes or
//! reorders anything. Matching is a case-insensitive substring test over a
//! bookmark's label, tooltip and URL.

use std::time::{Duration, Instant};

use crate::types::view::{BookmarkView, DashboardView, ListView};

/// Inactivity window after the last keystroke before a filter pass runs.
pub const SEARCH_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Applies `query` to `view`. A blank query restores full visibility.
pub fn filter(view: &mut DashboardView, query: &str) {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        reset(view);
        return;
    }

    for column in &mut view.columns {
        let mut any_visible = false;
        for list in &mut column.lists {
            any_visible |= filter_list(list, &needle);
        }
        column.visible = any_visible;
    }
}

/// Makes every column, list and bookmark visible again.
pub fn reset(view: &mut DashboardView) {
    for column in &mut view.columns {
        column.visible = true;
        for list in &mut column.lists {
            reset_list(list);
        }
    }
}

fn reset_list(list: &mut ListView) {
    list.visible = true;
    for bookmark in &mut list.bookmarks {
        bookmark.visible = true;
    }
    for child in &mut list.children {
        reset_list(child);
    }
}

/// Bottom-up: children are decided before the list itself.
fn filter_list(list: &mut ListView, needle: &str) -> bool {
    let mut any_child = false;
    for child in &mut list.children {
        any_child |= filter_list(child, needle);
    }

    let mut any_bookmark = false;
    for bookmark in &mut list.bookmarks {
        bookmark.visible = matches(bookmark, needle);
        any_bookmark |= bookmark.visible;
    }

    list.visible = any_bookmark || any_child;
    list.visible
}

/// `needle` must already be trimmed and lowercased.
pub fn matches(bookmark: &BookmarkView, needle: &str) -> bool {
    [&bookmark.label, &bookmark.tooltip, &bookmark.url]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Debounces keystrokes: only the latest input survives, and it becomes due
/// once [`SEARCH_SETTLE_DELAY`] has passed without further input.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records a keystroke, superseding any pending pass.
    pub fn input(&mut self, query: &str, now: Instant) {
        self.pending = Some((query.to_string(), now + self.delay));
    }

    /// When the pending pass becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Returns the pending query once it is due and clears it.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now >= *at => self.pending.take().map(|(q, _)| q),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_SETTLE_DELAY)
    }
}
