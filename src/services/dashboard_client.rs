//! Dashboard data sources and startup for HomeDash.
//!
//! A [`DashboardSource`] supplies the config, the lists, the bookmarks and
//! the sync status. [`bootstrap`] turns one into a loaded
//! [`DashboardManager`], or into the [`StartupError`] the user should see.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::database::Database;
use crate::managers::cache_manager::{CacheManager, CacheManagerTrait};
use crate::managers::dashboard_manager::DashboardManager;
use crate::services::preferences_client::{
    resolve_preferences, LayoutPersistence, LocalLayoutStore, PreferenceSink,
};
use crate::services::renderer::RenderOptions;
use crate::types::bookmark::{RawBookmark, RawList};
use crate::types::config::DashboardConfig;
use crate::types::errors::{FetchError, StartupError};
use crate::types::sync::{SyncState, SyncStatus};

/// Read side of the dashboard server.
#[allow(async_fn_in_trait)]
pub trait DashboardSource {
    /// The configuration resource.
    async fn fetch_config(&self) -> Result<DashboardConfig, FetchError>;
    /// Every cached list.
    async fn fetch_lists(&self) -> Result<Vec<RawList>, FetchError>;
    /// Every cached bookmark, tagged with its list.
    async fn fetch_bookmarks(&self) -> Result<Vec<RawBookmark>, FetchError>;
    /// State of the upstream sync job.
    async fn fetch_sync_status(&self) -> Result<SyncStatus, FetchError>;
}

/// Reads the dashboard server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDashboardSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDashboardSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url));
        }
        response
            .json()
            .await
            .map_err(|e| FetchError::ParseError(format!("{}: {}", path, e)))
    }
}

/// Decodes `value[key]`, or `value` itself when it is already an array.
fn unwrap_items<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>, FetchError> {
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| FetchError::ParseError(format!("missing `{}`", key)))?,
        other => return Err(FetchError::ParseError(format!("unexpected payload: {}", other))),
    };
    serde_json::from_value(items).map_err(|e| FetchError::ParseError(e.to_string()))
}

impl DashboardSource for HttpDashboardSource {
    async fn fetch_config(&self) -> Result<DashboardConfig, FetchError> {
        let value = self.get_json("/config.json").await?;
        serde_json::from_value(value).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    async fn fetch_lists(&self) -> Result<Vec<RawList>, FetchError> {
        unwrap_items(self.get_json("/api/cache/lists").await?, "lists")
    }

    async fn fetch_bookmarks(&self) -> Result<Vec<RawBookmark>, FetchError> {
        unwrap_items(self.get_json("/api/cache/bookmarks").await?, "bookmarks")
    }

    async fn fetch_sync_status(&self) -> Result<SyncStatus, FetchError> {
        let value = self.get_json("/api/sync/status").await?;
        serde_json::from_value(value).map_err(|e| FetchError::ParseError(e.to_string()))
    }
}

/// Reads the local SQLite cache directly.
pub struct CacheDashboardSource<'a> {
    db: &'a Database,
    config: DashboardConfig,
}

impl<'a> CacheDashboardSource<'a> {
    pub fn new(db: &'a Database, config: DashboardConfig) -> Self {
        Self { db, config }
    }

    fn cache(&self) -> CacheManager<'_> {
        CacheManager::new(self.db.connection())
    }
}

impl<'a> DashboardSource for CacheDashboardSource<'a> {
    async fn fetch_config(&self) -> Result<DashboardConfig, FetchError> {
        Ok(self.config.clone())
    }

    async fn fetch_lists(&self) -> Result<Vec<RawList>, FetchError> {
        Ok(self.cache().get_all_lists()?)
    }

    async fn fetch_bookmarks(&self) -> Result<Vec<RawBookmark>, FetchError> {
        Ok(self.cache().get_all_bookmarks()?)
    }

    async fn fetch_sync_status(&self) -> Result<SyncStatus, FetchError> {
        Ok(self.cache().get_sync_status()?)
    }
}

/// A successfully started dashboard.
pub struct Startup {
    pub config: DashboardConfig,
    pub dashboard: DashboardManager,
}

/// An empty cache counts as "not yet synced" while the first sync is pending.
pub fn awaiting_first_sync(lists: &[RawList], status: &SyncStatus) -> bool {
    lists.is_empty() && matches!(status.status, SyncState::NeverSynced | SyncState::Running)
}

/// Loads config and data from `source` and lays out the dashboard.
pub async fn bootstrap<S: DashboardSource>(
    source: &S,
    local: LocalLayoutStore,
    sink: Box<dyn PreferenceSink>,
) -> Result<Startup, StartupError> {
    let config = source.fetch_config().await.map_err(|e| {
        warn!(error = %e, "configuration unavailable");
        StartupError::ConfigUnavailable(e.to_string())
    })?;

    let lists = source
        .fetch_lists()
        .await
        .map_err(|e| StartupError::DataUnavailable(e.to_string()))?;
    let bookmarks = source
        .fetch_bookmarks()
        .await
        .map_err(|e| StartupError::DataUnavailable(e.to_string()))?;

    if lists.is_empty() {
        match source.fetch_sync_status().await {
            Ok(status) if awaiting_first_sync(&lists, &status) => {
                info!(status = status.status.as_str(), "cache not yet synced");
                return Err(StartupError::NotYetSynced);
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "could not read sync status"),
        }
    }

    let preference = resolve_preferences(config.preferences.clone(), &local);
    let options = RenderOptions {
        target: config.bookmark_target,
    };
    let mut dashboard = DashboardManager::new(preference, options, LayoutPersistence::new(local, sink));
    dashboard.load(&lists, &bookmarks);
    Ok(Startup { config, dashboard })
}
