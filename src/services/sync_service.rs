//! Upstream sync for HomeDash.
//!
//! Pulls lists and link bookmarks from the KaraKeep API into the SQLite
//! cache. A sync either completes and records `success`, or records `error`
//! with the message and returns it; there is no automatic retry.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::database::Database;
use crate::managers::cache_manager::{CacheManager, CacheManagerTrait, CachedBookmark};
use crate::services::field_resolver::{self, Field, FieldSource, CRAWLED_TITLE_SOURCES, USER_TITLE_SOURCES};
use crate::types::bookmark::{RawBookmark, RawList, PLACEHOLDER_URL};
use crate::types::config::DashboardConfig;
use crate::types::errors::SyncError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Stored rows prefer the crawled content over top-level fields.
const STORED_URL_SOURCES: &[FieldSource] = &[
    FieldSource::Content,
    FieldSource::Direct,
    FieldSource::SourceUrl,
];
const STORED_DETAIL_SOURCES: &[FieldSource] = &[
    FieldSource::Content,
    FieldSource::Direct,
    FieldSource::Metadata,
];

/// Where the sync pulls from.
#[allow(async_fn_in_trait)]
pub trait UpstreamSource {
    /// All lists visible to the API key.
    async fn fetch_lists(&self) -> Result<Vec<RawList>, SyncError>;
    /// Bookmarks of one list, of every kind.
    async fn fetch_list_bookmarks(&self, list_id: &str) -> Result<Vec<RawBookmark>, SyncError>;
}

/// Authenticated client for the KaraKeep REST API.
pub struct KarakeepClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl KarakeepClient {
    pub fn new(karakeep_url: &str, api_key: &str) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SyncError::NetworkError(format!("failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: format!("{}/api/v1", karakeep_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }

    /// Builds a client from the config, rejecting a missing or placeholder key.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, SyncError> {
        if config.karakeep_url.trim().is_empty() {
            return Err(SyncError::ConfigError("Missing karakeepUrl in config".to_string()));
        }
        let api_key = config
            .usable_api_key()
            .ok_or_else(|| SyncError::ConfigError("Invalid API key in config".to_string()))?;
        Self::new(&config.karakeep_url, api_key)
    }

    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, SyncError> {
        let url = self.api_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SyncError::NetworkError(format!("{}: {}", endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::ApiError(format!("HTTP {} from {}", status.as_u16(), endpoint)));
        }
        response
            .json()
            .await
            .map_err(|e| SyncError::ApiError(format!("invalid JSON from {}: {}", endpoint, e)))
    }
}

impl UpstreamSource for KarakeepClient {
    async fn fetch_lists(&self) -> Result<Vec<RawList>, SyncError> {
        parse_lists(self.get_json("/lists").await?)
    }

    async fn fetch_list_bookmarks(&self, list_id: &str) -> Result<Vec<RawBookmark>, SyncError> {
        parse_bookmarks(self.get_json(&format!("/lists/{}/bookmarks", list_id)).await?)
    }
}

/// Accepts a bare array or `{"lists": [...]}`.
pub fn parse_lists(value: Value) -> Result<Vec<RawList>, SyncError> {
    let items = match value {
        Value::Object(mut map) => map.remove("lists").unwrap_or(Value::Array(Vec::new())),
        other => other,
    };
    serde_json::from_value(items).map_err(|e| SyncError::ApiError(format!("malformed lists: {}", e)))
}

/// Accepts a bare array, `{"bookmarks": [...]}` or `{"data": [...]}`.
pub fn parse_bookmarks(value: Value) -> Result<Vec<RawBookmark>, SyncError> {
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove("bookmarks")
            .or_else(|| map.remove("data"))
            .unwrap_or(Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    };
    serde_json::from_value(items)
        .map_err(|e| SyncError::ApiError(format!("malformed bookmarks: {}", e)))
}

/// Only plain links are cached; notes, images and assets are skipped.
pub fn is_link_bookmark(raw: &RawBookmark) -> bool {
    match &raw.content {
        None => true,
        Some(content) => content.kind.as_deref() == Some("link"),
    }
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Upstream modification time; rows without a readable one count as `now`.
pub fn modified_at(raw: &RawBookmark, now: DateTime<Utc>) -> DateTime<Utc> {
    raw.modified_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(now)
}

/// Flattens an upstream row into its cached form.
pub fn to_cached(raw: &RawBookmark, now: DateTime<Utc>) -> CachedBookmark {
    CachedBookmark {
        id: raw.id.clone(),
        title: field_resolver::resolve(raw, Field::Title, USER_TITLE_SOURCES),
        url: field_resolver::resolve(raw, Field::Url, STORED_URL_SOURCES)
            .unwrap_or_else(|| PLACEHOLDER_URL.to_string()),
        description: field_resolver::resolve(raw, Field::Description, STORED_DETAIL_SOURCES),
        favicon: field_resolver::resolve(raw, Field::Favicon, STORED_DETAIL_SOURCES),
        link_title: field_resolver::resolve(raw, Field::Title, CRAWLED_TITLE_SOURCES),
        modified_at: modified_at(raw, now).to_rfc3339(),
    }
}

/// Outcome of one completed sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub full: bool,
    pub lists: usize,
    pub deleted_lists: usize,
    pub updated_bookmarks: usize,
    pub deleted_bookmarks: usize,
}

/// Bookmark ids collected over one sync run.
#[derive(Default)]
struct ListRun {
    /// First list each link was fetched from, with its cached form.
    seen: HashMap<String, (String, CachedBookmark)>,
    /// Cached ids missing from their owning list, with that list.
    stale: Vec<(String, String)>,
}

/// Mirrors upstream into the cache.
pub struct SyncService<S: UpstreamSource> {
    source: S,
}

impl<S: UpstreamSource> SyncService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs one sync. `full` ignores the last incremental timestamp and
    /// rewrites every bookmark.
    pub async fn perform_sync(&self, db: &Database, full: bool) -> Result<SyncReport, SyncError> {
        let cache = CacheManager::new(db.connection());
        let started = Utc::now();
        let started_at = started.to_rfc3339();

        let since = if full {
            None
        } else {
            cache
                .get_sync_status()?
                .last_incremental_sync
                .as_deref()
                .and_then(parse_timestamp)
        };
        cache.mark_sync_running()?;

        match self.sync_all(&cache, since, started).await {
            Ok(mut report) => {
                report.full = full;
                cache.record_sync_success(&started_at, full)?;
                let elapsed = (Utc::now() - started).num_milliseconds();
                info!(
                    lists = report.lists,
                    updated = report.updated_bookmarks,
                    deleted = report.deleted_bookmarks,
                    elapsed_ms = elapsed,
                    full,
                    "sync completed"
                );
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "sync failed");
                if let Err(record) = cache.record_sync_error(&e.to_string()) {
                    warn!(error = %record, "failed to record sync error");
                }
                Err(e)
            }
        }
    }

    async fn sync_all(
        &self,
        cache: &CacheManager<'_>,
        since: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::default();
        let synced_at = now.to_rfc3339();

        let lists: Vec<RawList> = self
            .source
            .fetch_lists()
            .await?
            .into_iter()
            .filter(|l| !l.id.is_empty())
            .collect();
        for list in &lists {
            cache.upsert_list(list, &synced_at)?;
        }
        let keep: Vec<String> = lists.iter().map(|l| l.id.clone()).collect();
        report.deleted_lists = cache.delete_lists_except(&keep)?;
        report.lists = lists.len();
        info!(lists = report.lists, removed = report.deleted_lists, "synced lists");

        let mut run = ListRun::default();
        for list in &lists {
            debug!(list = %list.name, "syncing bookmarks");
            report.updated_bookmarks += self.sync_list(cache, &list.id, since, now, &mut run).await?;
        }

        // A row dropped by its owning list survives if another list still
        // carries it; it moves to that list instead of being deleted.
        for (id, owner) in &run.stale {
            match run.seen.get(id) {
                Some((list_id, row)) => {
                    debug!(bookmark = %id, from = %owner, to = %list_id, "moving bookmark to another list");
                    cache.delete_bookmark(id)?;
                    cache.upsert_bookmark(list_id, row, &synced_at)?;
                    report.updated_bookmarks += 1;
                }
                None => {
                    debug!(bookmark = %id, list = %owner, "removing bookmark no longer upstream");
                    cache.delete_bookmark(id)?;
                    report.deleted_bookmarks += 1;
                }
            }
        }
        Ok(report)
    }

    async fn sync_list(
        &self,
        cache: &CacheManager<'_>,
        list_id: &str,
        since: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        run: &mut ListRun,
    ) -> Result<usize, SyncError> {
        let fetched = self.source.fetch_list_bookmarks(list_id).await?;
        let mut stale: HashSet<String> = cache.bookmark_ids_for_list(list_id)?.into_iter().collect();
        let synced_at = now.to_rfc3339();
        let mut updated = 0;

        for raw in fetched.iter().filter(|b| is_link_bookmark(b) && !b.id.is_empty()) {
            stale.remove(&raw.id);
            let row = to_cached(raw, now);
            let fresh = since.map_or(true, |since| modified_at(raw, now) > since);
            if fresh {
                cache.upsert_bookmark(list_id, &row, &synced_at)?;
                updated += 1;
            }
            run.seen
                .entry(raw.id.clone())
                .or_insert_with(|| (list_id.to_string(), row));
        }

        run.stale
            .extend(stale.into_iter().map(|id| (id, list_id.to_string())));
        Ok(updated)
    }

    /// Initial full sync, then an incremental one every `interval`, until
    /// Ctrl-C. Failed runs are logged and the schedule continues.
    pub async fn run_schedule(&self, db: &Database, interval: Duration) {
        info!("performing initial full sync");
        if let Err(e) = self.perform_sync(db, true).await {
            warn!(error = %e, "initial sync failed, will retry on schedule");
        }

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        info!(interval_secs = interval.as_secs(), "sync scheduled");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Errors were already recorded in the cache.
                    let _ = self.perform_sync(db, false).await;
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("shutting down sync service");
                    break;
                }
            }
        }
    }
}
