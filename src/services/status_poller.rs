//! Passive sync-status indicator for HomeDash.
//!
//! The poller reads the sync status on a fixed interval and turns it into a
//! short label. A failed read produces no update; the previous label stays.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::services::dashboard_client::DashboardSource;
use crate::services::sync_service::parse_timestamp;
use crate::types::sync::{SyncState, SyncStatus};

pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// What the status badge shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncIndicator {
    pub state: SyncState,
    pub text: String,
}

impl SyncIndicator {
    pub fn from_status(status: &SyncStatus, now: DateTime<Utc>) -> Self {
        let text = match status.status {
            SyncState::Success => {
                let last = status
                    .last_incremental_sync
                    .as_deref()
                    .or(status.last_full_sync.as_deref())
                    .and_then(parse_timestamp);
                match last {
                    Some(at) => format!("Synced {}", relative_time(at, now)),
                    None => "Synced".to_string(),
                }
            }
            SyncState::Running => "Syncing…".to_string(),
            SyncState::Error => format!(
                "Sync error: {}",
                status.error.as_deref().unwrap_or("unknown error")
            ),
            _ => "Not synced yet".to_string(),
        };
        Self {
            state: status.status.clone(),
            text,
        }
    }
}

/// "just now", "5m ago", "3h ago", "2d ago". Future times read as just now.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    }
}

/// Polls a [`DashboardSource`] for the sync status.
pub struct StatusPoller<S: DashboardSource> {
    source: S,
    interval: Duration,
    current: Option<SyncIndicator>,
}

impl<S: DashboardSource> StatusPoller<S> {
    pub fn new(source: S) -> Self {
        Self::with_interval(source, STATUS_POLL_INTERVAL)
    }

    pub fn with_interval(source: S, interval: Duration) -> Self {
        Self {
            source,
            interval,
            current: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn current(&self) -> Option<&SyncIndicator> {
        self.current.as_ref()
    }

    /// One poll. Returns the new indicator, or `None` if the read failed.
    pub async fn poll_once(&mut self, now: DateTime<Utc>) -> Option<SyncIndicator> {
        match self.source.fetch_sync_status().await {
            Ok(status) => {
                let indicator = SyncIndicator::from_status(&status, now);
                self.current = Some(indicator.clone());
                Some(indicator)
            }
            Err(e) => {
                debug!(error = %e, "sync status poll failed");
                None
            }
        }
    }

    /// Polls forever, calling `on_update` for every successful read.
    pub async fn run<F: FnMut(&SyncIndicator)>(&mut self, mut on_update: F) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            if let Some(indicator) = self.poll_once(Utc::now()).await {
                on_update(&indicator);
            }
        }
    }
}
