//! App Core for HomeDash.
//!
//! Holds the config, the cache database and the dashboard, and runs the
//! startup sequence against the local cache or, once connected, against a
//! dashboard server over HTTP.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::database::Database;
use crate::managers::dashboard_manager::DashboardManager;
use crate::services::config_store::{ConfigStore, ConfigStoreTrait};
use crate::services::dashboard_client::{bootstrap, CacheDashboardSource, HttpDashboardSource};
use crate::services::preferences_client::{
    resolve_preferences, ConfigFileSink, HttpPreferenceSink, LayoutPersistence, LocalLayoutStore,
    PreferenceSink, LOCAL_LAYOUT_FILE,
};
use crate::services::renderer::RenderOptions;
use crate::services::status_poller::{StatusPoller, SyncIndicator};
use crate::types::config::DashboardConfig;
use crate::types::errors::StartupError;
use crate::types::layout::LayoutPreference;
use crate::types::view::DashboardView;

/// Cache file name used when a data directory is given explicitly.
pub const CACHE_DB_FILE: &str = "karakeep.db";

/// Central application struct.
///
/// `CacheManager` borrows the connection with a lifetime, so it is created
/// on demand via `CacheManager::new(app.db.connection())`.
pub struct App {
    pub config: DashboardConfig,
    pub config_store: ConfigStore,
    pub local_layout: LocalLayoutStore,
    pub db: Database,
    pub dashboard: DashboardManager,
    server: Option<StatusPoller<HttpDashboardSource>>,
    runtime: tokio::runtime::Runtime,
}

impl App {
    /// Opens the app. With `data_dir`, the cache and the local layout live
    /// there; otherwise the cache path comes from the config and the layout
    /// from the platform data directory.
    pub fn new(config_path: Option<String>, data_dir: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let config_store = ConfigStore::new(config_path);
        let config = config_store.load_or_create()?;

        let (db_path, local_layout) = match data_dir {
            Some(dir) => (dir.join(CACHE_DB_FILE), LocalLayoutStore::new(dir.join(LOCAL_LAYOUT_FILE))),
            None => (PathBuf::from(&config.database.path), LocalLayoutStore::in_data_dir()),
        };
        let db = Database::open(&db_path)?;

        // One worker keeps spawned preference saves moving between calls.
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        let sink = Box::new(ConfigFileSink::new(config_store.clone()));
        let dashboard = Self::new_dashboard(&config, &local_layout, sink);
        Ok(Self {
            config,
            config_store,
            local_layout,
            db,
            dashboard,
            server: None,
            runtime,
        })
    }

    /// Switches to a dashboard server: startup reads it over HTTP, layout
    /// saves are POSTed to it and the sync badge polls it.
    pub fn connect(&mut self, base_url: &str) {
        info!(url = %base_url, "using dashboard server");
        self.server = Some(StatusPoller::new(HttpDashboardSource::new(base_url)));
        self.dashboard = Self::new_dashboard(&self.config, &self.local_layout, self.preference_sink());
    }

    /// Base URL of the connected dashboard server, if any.
    pub fn server_url(&self) -> Option<&str> {
        self.server.as_ref().map(|poller| poller.source().base_url())
    }

    fn preference_sink(&self) -> Box<dyn PreferenceSink> {
        match self.server_url() {
            Some(url) => Box::new(HttpPreferenceSink::new(url, self.runtime.handle().clone())),
            None => Box::new(ConfigFileSink::new(self.config_store.clone())),
        }
    }

    fn new_dashboard(
        config: &DashboardConfig,
        local_layout: &LocalLayoutStore,
        sink: Box<dyn PreferenceSink>,
    ) -> DashboardManager {
        let preference = resolve_preferences(config.preferences.clone(), local_layout);
        let options = RenderOptions {
            target: config.bookmark_target,
        };
        DashboardManager::new(
            preference,
            options,
            LayoutPersistence::new(local_layout.clone(), sink),
        )
    }

    /// Startup sequence: reload the config, read the cache or the server,
    /// lay out the dashboard. On error the previous dashboard is left in
    /// place.
    pub fn startup(&mut self) -> Result<&DashboardView, StartupError> {
        let sink = self.preference_sink();
        let local = self.local_layout.clone();
        let startup = match &self.server {
            Some(poller) => self.runtime.block_on(bootstrap(poller.source(), local, sink))?,
            None => {
                let config = self
                    .config_store
                    .load()
                    .map_err(|e| StartupError::ConfigUnavailable(e.to_string()))?;
                let source = CacheDashboardSource::new(&self.db, config);
                self.runtime.block_on(bootstrap(&source, local, sink))?
            }
        };

        self.config = startup.config;
        self.dashboard = startup.dashboard;
        Ok(self.dashboard.view())
    }

    /// Saves a whole preference object, as the preferences endpoint does,
    /// and lays the dashboard out with it.
    pub fn save_preferences(&mut self, preferences: LayoutPreference) -> Result<(), Box<dyn std::error::Error>> {
        self.preference_sink().push(&preferences)?;
        self.local_layout.save(&preferences)?;
        self.config.preferences = Some(preferences.clone());
        self.dashboard.set_preference(preferences);
        Ok(())
    }

    /// Polls the connected server for its sync status. A failed read keeps
    /// the previous badge; `None` when nothing was ever read or there is no
    /// server.
    pub fn poll_sync_indicator(&mut self) -> Option<SyncIndicator> {
        let poller = self.server.as_mut()?;
        match self.runtime.block_on(poller.poll_once(Utc::now())) {
            Some(indicator) => Some(indicator),
            None => poller.current().cloned(),
        }
    }
}
