use serde::{Deserialize, Serialize};

use super::layout::LayoutPreference;

/// Placeholder API key written into freshly generated config files.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_KARAKEEP_API_KEY_HERE";

/// Dashboard configuration as read from `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub karakeep_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub bookmark_target: BookmarkTarget,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    /// `None` when the config carries no preferences object at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<LayoutPreference>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            karakeep_url: "http://localhost:3000".to_string(),
            api_key: Some(API_KEY_PLACEHOLDER.to_string()),
            bookmark_target: BookmarkTarget::default(),
            sync: SyncSettings::default(),
            database: DatabaseSettings::default(),
            preferences: Some(LayoutPreference::default()),
        }
    }
}

impl DashboardConfig {
    /// The API key, unless it is missing, blank or still the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != API_KEY_PLACEHOLDER)
    }

    pub fn preferences_or_default(&self) -> LayoutPreference {
        self.preferences.clone().unwrap_or_default()
    }
}

/// Where bookmark links open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookmarkTarget {
    #[default]
    #[serde(rename = "_self")]
    SameTab,
    #[serde(rename = "_blank")]
    NewTab,
}

impl BookmarkTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookmarkTarget::SameTab => "_self",
            BookmarkTarget::NewTab => "_blank",
        }
    }
}

/// Upstream sync job settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncSettings {
    pub enabled: bool,
    pub interval_minutes: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_minutes: 5,
        }
    }
}

/// Location of the SQLite bookmark cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "/app/data/karakeep.db".to_string(),
        }
    }
}
