//! HomeDash bookmark cache.
//!
//! SQLite connection management for the local copy of the upstream
//! bookmark manager's lists and bookmarks.
//!
//! # Usage
//!
//! ```no_run
//! use homedash::database::Database;
//!
//! // Open the cache named in config.json
//! let db = Database::open("/app/data/karakeep.db").expect("failed to open cache");
//!
//! // Or use an in-memory cache for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory cache");
//!
//! let conn = db.connection();
//! ```

pub mod connection;

pub use connection::Database;
