use serde::{Deserialize, Serialize};

/// State of the upstream sync job as reported by the sync-status endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Success,
    Error,
    Running,
    #[default]
    NeverSynced,
    #[serde(other)]
    Idle,
}

impl SyncState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncState::Success => "success",
            SyncState::Error => "error",
            SyncState::Running => "running",
            SyncState::NeverSynced => "never_synced",
            SyncState::Idle => "idle",
        }
    }

    /// Parses a stored status string; unknown values read as idle.
    pub fn parse(value: &str) -> Self {
        match value {
            "success" => SyncState::Success,
            "error" => SyncState::Error,
            "running" => SyncState::Running,
            "never_synced" => SyncState::NeverSynced,
            _ => SyncState::Idle,
        }
    }
}

/// Sync-status payload; timestamps are RFC 3339 strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    #[serde(default)]
    pub status: SyncState,
    #[serde(default)]
    pub last_full_sync: Option<String>,
    #[serde(default)]
    pub last_incremental_sync: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Row counts reported by the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub lists: i64,
    pub bookmarks: i64,
    pub sync_status: SyncStatus,
}
