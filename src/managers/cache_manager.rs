//! Cache Manager for HomeDash.
//!
//! Reads and writes the SQLite copy of the upstream lists and bookmarks.
//! Reads return rows in the same shapes the dashboard endpoints serve, so a
//! cache-backed dashboard and an HTTP-backed one see identical data.

use rusqlite::{params, Connection, OptionalExtension};

use crate::types::bookmark::{RawBookmark, RawContent, RawList};
use crate::types::errors::CacheError;
use crate::types::sync::{CacheStats, SyncState, SyncStatus};

const BOOKMARK_COLUMNS: &str =
    "id, list_id, title, url, description, favicon, link_title, modified_at";

/// A bookmark ready to be written to the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedBookmark {
    pub id: String,
    pub title: Option<String>,
    pub url: String,
    pub description: Option<String>,
    pub favicon: Option<String>,
    pub link_title: Option<String>,
    pub modified_at: String,
}

/// Trait defining cache operations.
pub trait CacheManagerTrait {
    fn get_all_lists(&self) -> Result<Vec<RawList>, CacheError>;
    fn get_all_bookmarks(&self) -> Result<Vec<RawBookmark>, CacheError>;
    fn get_bookmarks_for_list(&self, list_id: &str) -> Result<Vec<RawBookmark>, CacheError>;
    fn search_bookmarks(&self, query: &str) -> Result<Vec<RawBookmark>, CacheError>;
    fn get_sync_status(&self) -> Result<SyncStatus, CacheError>;
    fn get_stats(&self) -> Result<CacheStats, CacheError>;
    fn upsert_list(&self, list: &RawList, synced_at: &str) -> Result<(), CacheError>;
    fn delete_lists_except(&self, keep: &[String]) -> Result<usize, CacheError>;
    fn bookmark_ids_for_list(&self, list_id: &str) -> Result<Vec<String>, CacheError>;
    fn upsert_bookmark(&self, list_id: &str, bookmark: &CachedBookmark, synced_at: &str) -> Result<(), CacheError>;
    fn delete_bookmark(&self, id: &str) -> Result<(), CacheError>;
    fn mark_sync_running(&self) -> Result<(), CacheError>;
    fn record_sync_success(&self, started_at: &str, full: bool) -> Result<(), CacheError>;
    fn record_sync_error(&self, message: &str) -> Result<(), CacheError>;
}

/// Cache manager backed by a SQLite connection.
pub struct CacheManager<'a> {
    conn: &'a Connection,
}

impl<'a> CacheManager<'a> {
    /// Creates a new `CacheManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<RawBookmark> {
        let url: Option<String> = row.get(3)?;
        let description: Option<String> = row.get(4)?;
        let favicon: Option<String> = row.get(5)?;
        let link_title: Option<String> = row.get(6)?;
        let title: Option<String> = row.get(2)?;
        Ok(RawBookmark {
            id: row.get(0)?,
            list_id: row.get(1)?,
            name: title.clone(),
            title,
            url: url.clone(),
            source_url: url.clone(),
            favicon: favicon.clone(),
            description: description.clone(),
            content: Some(RawContent {
                kind: Some("link".to_string()),
                title: link_title.clone(),
                url,
                favicon: favicon.clone(),
                description: description.clone(),
            }),
            metadata: Some(RawContent {
                kind: None,
                title: link_title,
                url: None,
                favicon,
                description,
            }),
            modified_at: row.get(7)?,
        })
    }

    fn query_bookmarks(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<RawBookmark>, CacheError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, Self::row_to_bookmark)?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn ensure_status_row(&self) -> Result<(), CacheError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO sync_status (id, status) VALUES (1, 'never_synced')",
            [],
        )?;
        Ok(())
    }
}

/// Escapes LIKE wildcards so the query matches literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

impl<'a> CacheManagerTrait for CacheManager<'a> {
    /// All lists, ordered by upstream position then name.
    fn get_all_lists(&self) -> Result<Vec<RawList>, CacheError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, icon, parent_id, position FROM lists \
             ORDER BY position, name COLLATE NOCASE, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RawList {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                icon: row.get(3)?,
                parent_id: row.get(4)?,
                position: row.get(5)?,
            })
        })?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn get_all_bookmarks(&self) -> Result<Vec<RawBookmark>, CacheError> {
        self.query_bookmarks(
            &format!("SELECT {} FROM bookmarks ORDER BY id", BOOKMARK_COLUMNS),
            &[],
        )
    }

    fn get_bookmarks_for_list(&self, list_id: &str) -> Result<Vec<RawBookmark>, CacheError> {
        self.query_bookmarks(
            &format!(
                "SELECT {} FROM bookmarks WHERE list_id = ?1 ORDER BY id",
                BOOKMARK_COLUMNS
            ),
            &[&list_id],
        )
    }

    /// Case-insensitive match on title, URL or description. A blank query
    /// returns nothing.
    fn search_bookmarks(&self, query: &str) -> Result<Vec<RawBookmark>, CacheError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let pattern = like_pattern(query);
        self.query_bookmarks(
            &format!(
                "SELECT {} FROM bookmarks \
                 WHERE title LIKE ?1 ESCAPE '\\' OR url LIKE ?1 ESCAPE '\\' \
                 OR description LIKE ?1 ESCAPE '\\' ORDER BY id",
                BOOKMARK_COLUMNS
            ),
            &[&pattern],
        )
    }

    fn get_sync_status(&self) -> Result<SyncStatus, CacheError> {
        let row = self
            .conn
            .query_row(
                "SELECT status, last_full_sync, last_incremental_sync, error_message \
                 FROM sync_status WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, Option<String>>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                },
            )
            .optional()?;

        Ok(match row {
            Some((status, last_full_sync, last_incremental_sync, error)) => SyncStatus {
                status: status
                    .as_deref()
                    .map(SyncState::parse)
                    .unwrap_or(SyncState::NeverSynced),
                last_full_sync,
                last_incremental_sync,
                error,
            },
            None => SyncStatus::default(),
        })
    }

    fn get_stats(&self) -> Result<CacheStats, CacheError> {
        let lists: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM lists", [], |row| row.get(0))?;
        let bookmarks: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
        Ok(CacheStats {
            lists,
            bookmarks,
            sync_status: self.get_sync_status()?,
        })
    }

    fn upsert_list(&self, list: &RawList, synced_at: &str) -> Result<(), CacheError> {
        self.conn.execute(
            "INSERT INTO lists (id, name, description, icon, parent_id, position, last_synced) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, \
             description = excluded.description, icon = excluded.icon, \
             parent_id = excluded.parent_id, position = excluded.position, \
             last_synced = excluded.last_synced",
            params![
                list.id,
                list.name,
                list.description.as_deref().unwrap_or(""),
                list.icon.as_deref().unwrap_or(crate::types::bookmark::DEFAULT_LIST_ICON),
                list.parent_id,
                list.position.unwrap_or(0),
                synced_at
            ],
        )?;
        Ok(())
    }

    /// Deletes every list not in `keep` (their bookmarks cascade).
    fn delete_lists_except(&self, keep: &[String]) -> Result<usize, CacheError> {
        let mut stmt = self.conn.prepare("SELECT id FROM lists")?;
        let existing: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<_, _>>()?;
        let mut deleted = 0;
        for id in existing.iter().filter(|id| !keep.contains(id)) {
            deleted += self
                .conn
                .execute("DELETE FROM lists WHERE id = ?1", params![id])?;
        }
        Ok(deleted)
    }

    fn bookmark_ids_for_list(&self, list_id: &str) -> Result<Vec<String>, CacheError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM bookmarks WHERE list_id = ?1")?;
        let ids = stmt
            .query_map(params![list_id], |row| row.get(0))?
            .collect::<Result<_, _>>()?;
        Ok(ids)
    }

    /// Inserts or refreshes a bookmark. An id already cached under another
    /// list keeps that list.
    fn upsert_bookmark(&self, list_id: &str, bookmark: &CachedBookmark, synced_at: &str) -> Result<(), CacheError> {
        self.conn.execute(
            "INSERT INTO bookmarks (id, list_id, title, url, description, favicon, link_title, modified_at, last_synced) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
             ON CONFLICT(id) DO UPDATE SET title = excluded.title, url = excluded.url, \
             description = excluded.description, favicon = excluded.favicon, \
             link_title = excluded.link_title, modified_at = excluded.modified_at, \
             last_synced = excluded.last_synced",
            params![
                bookmark.id,
                list_id,
                bookmark.title,
                bookmark.url,
                bookmark.description,
                bookmark.favicon,
                bookmark.link_title,
                bookmark.modified_at,
                synced_at
            ],
        )?;
        Ok(())
    }

    fn delete_bookmark(&self, id: &str) -> Result<(), CacheError> {
        self.conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn mark_sync_running(&self) -> Result<(), CacheError> {
        self.ensure_status_row()?;
        self.conn.execute(
            "UPDATE sync_status SET status = 'running', error_message = NULL WHERE id = 1",
            [],
        )?;
        Ok(())
    }

    fn record_sync_success(&self, started_at: &str, full: bool) -> Result<(), CacheError> {
        self.ensure_status_row()?;
        if full {
            self.conn.execute(
                "UPDATE sync_status SET last_full_sync = ?1 WHERE id = 1",
                params![started_at],
            )?;
        }
        self.conn.execute(
            "UPDATE sync_status SET last_incremental_sync = ?1, status = 'success', \
             error_message = NULL WHERE id = 1",
            params![started_at],
        )?;
        Ok(())
    }

    fn record_sync_error(&self, message: &str) -> Result<(), CacheError> {
        self.ensure_status_row()?;
        self.conn.execute(
            "UPDATE sync_status SET status = 'error', error_message = ?1 WHERE id = 1",
            params![message],
        )?;
        Ok(())
    }
}
