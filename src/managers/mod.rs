// HomeDash state managers
// Managers own dashboard state: hierarchy, column layout, drag gestures, search visibility, cache rows.

pub mod cache_manager;
pub mod dashboard_manager;
pub mod hierarchy_manager;
pub mod layout_manager;
pub mod reorder_manager;
pub mod search_manager;
