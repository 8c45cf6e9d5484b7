//! SQLite connection management for the HomeDash cache.
//!
//! Provides the [`Database`] struct that wraps a `rusqlite::Connection` and
//! creates the cache tables on open.

use std::fs;
use std::path::Path;

use rusqlite::Connection;

/// Tables are created if missing; existing data is never altered.
const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS lists (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        icon TEXT NOT NULL DEFAULT '📁',
        parent_id TEXT,
        position INTEGER NOT NULL DEFAULT 0,
        last_synced TEXT
    );

    CREATE TABLE IF NOT EXISTS bookmarks (
        id TEXT PRIMARY KEY,
        list_id TEXT NOT NULL,
        title TEXT,
        url TEXT,
        description TEXT,
        favicon TEXT,
        link_title TEXT,
        modified_at TEXT,
        last_synced TEXT,
        FOREIGN KEY (list_id) REFERENCES lists(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_bookmarks_list_id ON bookmarks(list_id);
    CREATE INDEX IF NOT EXISTS idx_bookmarks_modified ON bookmarks(modified_at);

    CREATE TABLE IF NOT EXISTS sync_status (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        last_full_sync TEXT,
        last_incremental_sync TEXT,
        status TEXT,
        error_message TEXT
    );
";

/// Cache database wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the cache at `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection or table creation fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                // A failure here surfaces as an open error below.
                let _ = fs::create_dir_all(parent);
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
        Self::init(conn)
    }

    /// Opens an in-memory cache; discarded when the `Database` is dropped.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Returns a reference to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
