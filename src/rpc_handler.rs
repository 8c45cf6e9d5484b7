//! RPC method handler for the HomeDash JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! dashboard, the cache and the config via the `App` struct.

use std::sync::Mutex;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::cache_manager::{CacheManager, CacheManagerTrait};
use crate::managers::dashboard_manager::DropTarget;
use crate::services::status_poller::SyncIndicator;
use crate::types::bookmark::{RawBookmark, RawList};
use crate::types::layout::LayoutPreference;

fn to_json<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("serialization error: {}", e))
}

fn required_usize(params: &Value, key: &str) -> Result<usize, String> {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .ok_or_else(|| format!("missing {}", key))
}

fn required_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Dashboard ───
        "dashboard.load" => {
            let lists: Vec<RawList> = match params.get("lists") {
                Some(v) => serde_json::from_value(v.clone()).map_err(|e| format!("invalid lists: {}", e))?,
                None => return Err("missing lists".to_string()),
            };
            let bookmarks: Vec<RawBookmark> = match params.get("bookmarks") {
                Some(v) => serde_json::from_value(v.clone()).map_err(|e| format!("invalid bookmarks: {}", e))?,
                None => Vec::new(),
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let view = a.dashboard.load(&lists, &bookmarks);
            to_json(view)
        }
        "dashboard.startup" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            match a.startup() {
                Ok(view) => Ok(json!({"ok": true, "view": to_json(view)?})),
                Err(e) => Ok(json!({
                    "ok": false,
                    "title": e.title(),
                    "message": e.message(),
                    "reloadAfterMs": e.auto_reload_after().map(|d| d.as_millis() as u64),
                })),
            }
        }
        "dashboard.view" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            to_json(a.dashboard.view())
        }

        // ─── Search ───
        "search.filter" => {
            let query = params.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            to_json(a.dashboard.search(query))
        }
        "search.input" => {
            let query = params.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.dashboard.search_input(query, Instant::now());
            let wait_ms = a
                .dashboard
                .search_deadline()
                .map(|d| d.saturating_duration_since(Instant::now()).as_millis() as u64);
            Ok(json!({"pending": true, "dueInMs": wait_ms}))
        }
        "search.poll" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let ran = a.dashboard.search_poll(Instant::now());
            if ran {
                Ok(json!({"ran": true, "view": to_json(a.dashboard.view())?}))
            } else {
                Ok(json!({"ran": false, "pending": a.dashboard.search_deadline().is_some()}))
            }
        }

        // ─── Drag and drop ───
        "drag.start" => {
            let list_id = required_str(params, "listId")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.dashboard.drag_start(list_id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "drag.enter" => {
            let column = required_usize(params, "column")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.dashboard.drag_enter(column).map_err(|e| e.to_string())?;
            Ok(json!({"highlighted": column}))
        }
        "drag.leave" => {
            let column = required_usize(params, "column")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.dashboard.drag_leave(column);
            Ok(json!({"ok": true}))
        }
        "drag.drop" => {
            let target = match params.get("column").and_then(|v| v.as_u64()) {
                Some(column) => DropTarget::Column {
                    column: column as usize,
                    index: required_usize(params, "index")?,
                },
                None => DropTarget::Outside,
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let command = a.dashboard.drop_card(target).map_err(|e| e.to_string())?;
            Ok(json!({
                "moved": command.is_some(),
                "command": to_json(&command)?,
                "view": to_json(a.dashboard.view())?,
            }))
        }
        "drag.end" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.dashboard.drag_end();
            Ok(json!({"ok": true}))
        }
        "favicon.broken" => {
            let id = required_str(params, "id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let found = a.dashboard.mark_favicon_broken(id);
            Ok(json!({"found": found}))
        }

        // ─── Layout preferences ───
        "layout.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({
                "columns": a.dashboard.columns(),
                "preferences": to_json(a.dashboard.preference())?,
            }))
        }
        "preferences.save" => {
            let preferences: LayoutPreference = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid preferences: {}", e))?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.save_preferences(preferences).map_err(|e| e.to_string())?;
            Ok(json!({"status": "success"}))
        }

        // ─── Cache ───
        "sync.status" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            if a.server_url().is_some() {
                let indicator = a.poll_sync_indicator();
                return Ok(json!({
                    "state": indicator.as_ref().map(|i| i.state.as_str()),
                    "indicator": indicator.map(|i| i.text),
                }));
            }
            let status = CacheManager::new(a.db.connection())
                .get_sync_status()
                .map_err(|e| e.to_string())?;
            let indicator = SyncIndicator::from_status(&status, Utc::now());
            Ok(json!({"status": to_json(&status)?, "indicator": indicator.text}))
        }
        "cache.stats" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let stats = CacheManager::new(a.db.connection())
                .get_stats()
                .map_err(|e| e.to_string())?;
            to_json(&stats)
        }
        "cache.search" => {
            let q = params.get("q").and_then(|v| v.as_str()).unwrap_or("");
            let a = app.lock().map_err(|e| e.to_string())?;
            let bookmarks = CacheManager::new(a.db.connection())
                .search_bookmarks(q)
                .map_err(|e| e.to_string())?;
            Ok(json!({"bookmarks": to_json(&bookmarks)?}))
        }
        "cache.lists" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let lists = CacheManager::new(a.db.connection())
                .get_all_lists()
                .map_err(|e| e.to_string())?;
            Ok(json!({"lists": to_json(&lists)?}))
        }
        "cache.bookmarks" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let cache = CacheManager::new(a.db.connection());
            let bookmarks = match params.get("listId").and_then(|v| v.as_str()) {
                Some(list_id) => cache.get_bookmarks_for_list(list_id),
                None => cache.get_all_bookmarks(),
            }
            .map_err(|e| e.to_string())?;
            Ok(json!({"bookmarks": to_json(&bookmarks)?}))
        }

        // ─── Misc ───
        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
