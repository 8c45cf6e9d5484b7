//! Layout persistence for HomeDash.
//!
//! Every save writes the full preference object to a local JSON fallback and
//! then pushes it to a [`PreferenceSink`]. Failures are logged and dropped;
//! the caller never sees them and the on-screen layout is never rolled back.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::platform;
use crate::services::config_store::{ConfigStore, ConfigStoreTrait};
use crate::types::errors::PreferencesError;
use crate::types::layout::{ColumnLayout, LayoutPreference};

/// File name of the local fallback inside the data directory.
pub const LOCAL_LAYOUT_FILE: &str = "layout.json";

/// Destination for saved preferences.
pub trait PreferenceSink {
    fn push(&self, preferences: &LayoutPreference) -> Result<(), PreferencesError>;
}

/// Durable local fallback holding `{columnOrder, columnLayout}`.
#[derive(Debug, Clone)]
pub struct LocalLayoutStore {
    path: PathBuf,
}

impl LocalLayoutStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at the platform data directory.
    pub fn in_data_dir() -> Self {
        Self::new(platform::get_data_dir().join(LOCAL_LAYOUT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored preference. Missing, unreadable or corrupt files
    /// all read as `None`.
    pub fn load(&self) -> Option<LayoutPreference> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(prefs) => Some(prefs),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "ignoring corrupt local layout");
                None
            }
        }
    }

    pub fn save(&self, preferences: &LayoutPreference) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PreferencesError::IoError(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(preferences)
            .map_err(|e| PreferencesError::SerializationError(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| PreferencesError::IoError(e.to_string()))
    }
}

/// Picks the preference to start from: the config's own preferences when it
/// has any, else the local fallback, else empty.
pub fn resolve_preferences(
    remote: Option<LayoutPreference>,
    local: &LocalLayoutStore,
) -> LayoutPreference {
    match remote {
        Some(prefs) => prefs,
        None => local.load().unwrap_or_default(),
    }
}

/// Writes preferences into `config.json` directly.
#[derive(Debug, Clone)]
pub struct ConfigFileSink {
    store: ConfigStore,
}

impl ConfigFileSink {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }
}

impl PreferenceSink for ConfigFileSink {
    fn push(&self, preferences: &LayoutPreference) -> Result<(), PreferencesError> {
        self.store
            .save_preferences(preferences)
            .map_err(|e| PreferencesError::IoError(e.to_string()))
    }
}

/// POSTs preferences to the dashboard server's preferences endpoint.
///
/// The request runs on the given runtime; `push` returns as soon as it is
/// spawned and the outcome is only logged.
pub struct HttpPreferenceSink {
    client: reqwest::Client,
    endpoint: String,
    runtime: tokio::runtime::Handle,
}

impl HttpPreferenceSink {
    pub fn new(base_url: &str, runtime: tokio::runtime::Handle) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/preferences", base_url.trim_end_matches('/')),
            runtime,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one save and waits for the answer.
    pub async fn send(
        client: &reqwest::Client,
        endpoint: &str,
        preferences: &LayoutPreference,
    ) -> Result<(), PreferencesError> {
        let response = client
            .post(endpoint)
            .json(preferences)
            .send()
            .await
            .map_err(|e| PreferencesError::NetworkError(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(PreferencesError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}

impl PreferenceSink for HttpPreferenceSink {
    fn push(&self, preferences: &LayoutPreference) -> Result<(), PreferencesError> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let preferences = preferences.clone();
        self.runtime.spawn(async move {
            if let Err(e) = Self::send(&client, &endpoint, &preferences).await {
                warn!(error = %e, "failed to save layout preferences");
            }
        });
        Ok(())
    }
}

/// Saves column layouts: local fallback first, then the sink.
pub struct LayoutPersistence {
    local: LocalLayoutStore,
    sink: Box<dyn PreferenceSink>,
}

impl LayoutPersistence {
    pub fn new(local: LocalLayoutStore, sink: Box<dyn PreferenceSink>) -> Self {
        Self { local, sink }
    }

    pub fn local(&self) -> &LocalLayoutStore {
        &self.local
    }

    /// Derives the flat order, writes both stores, and returns the full
    /// preference object. Errors are logged, never returned.
    pub fn save(&self, column_layout: ColumnLayout) -> LayoutPreference {
        let preferences = LayoutPreference::from_layout(column_layout);
        if let Err(e) = self.local.save(&preferences) {
            warn!(path = %self.local.path().display(), error = %e, "failed to write local layout");
        }
        if let Err(e) = self.sink.push(&preferences) {
            warn!(error = %e, "failed to save layout preferences");
        }
        preferences
    }
}
