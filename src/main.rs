//! HomeDash sync daemon.
//!
//! Mirrors the KaraKeep instance named in `config.json` into the SQLite
//! cache: one full sync at startup, then an incremental sync every
//! `sync.intervalMinutes` until interrupted.

use std::process::ExitCode;
use std::time::Duration;

use homedash::database::Database;
use homedash::logging;
use homedash::services::config_store::{ConfigStore, ConfigStoreTrait};
use homedash::services::sync_service::{KarakeepClient, SyncService};

use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = logging::init_tracing(logging::verbosity_from(
        std::env::var("HOMEDASH_VERBOSE").ok().as_deref(),
    )) {
        eprintln!("{}", e);
    }

    let store = ConfigStore::new(std::env::var("HOMEDASH_CONFIG").ok());
    let config = match store.load_or_create() {
        Ok(config) => config,
        Err(e) => {
            error!(path = store.get_config_path(), error = %e, "cannot load config");
            return ExitCode::FAILURE;
        }
    };

    if !config.sync.enabled {
        info!("sync is disabled in configuration");
        return ExitCode::SUCCESS;
    }

    let client = match KarakeepClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "cannot start sync");
            return ExitCode::FAILURE;
        }
    };

    let db = match Database::open(&config.database.path) {
        Ok(db) => db,
        Err(e) => {
            error!(path = %config.database.path, error = %e, "cannot open cache database");
            return ExitCode::FAILURE;
        }
    };

    info!(upstream = %config.karakeep_url, "starting KaraKeep sync service");
    let interval = Duration::from_secs(config.sync.interval_minutes.max(1) * 60);
    SyncService::new(client).run_schedule(&db, interval).await;
    ExitCode::SUCCESS
}
