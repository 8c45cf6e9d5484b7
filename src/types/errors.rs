use std::fmt;
use std::time::Duration;

/// Delay before a "not yet synced" page reloads itself.
pub const NOT_SYNCED_RELOAD_DELAY: Duration = Duration::from_secs(5);

// === ConfigError ===

/// Errors related to loading or writing `config.json`.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file does not exist.
    NotFound(String),
    /// An I/O error occurred while reading or writing the config file.
    IoError(String),
    /// Failed to serialize or deserialize the config.
    SerializationError(String),
    /// A config value is present but unusable.
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// === CacheError ===

/// Errors related to the SQLite bookmark cache.
#[derive(Debug)]
pub enum CacheError {
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::DatabaseError(msg) => write!(f, "Cache database error: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<rusqlite::Error> for CacheError {
    fn from(e: rusqlite::Error) -> Self {
        CacheError::DatabaseError(e.to_string())
    }
}

// === FetchError ===

/// Errors raised while reading from the dashboard's data endpoints.
#[derive(Debug)]
pub enum FetchError {
    /// The request could not be sent or no response arrived.
    NetworkError(String),
    /// The endpoint answered with a non-success status.
    HttpStatus(u16, String),
    /// The response body did not have the expected shape.
    ParseError(String),
    /// The local cache backing the source failed.
    CacheError(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            FetchError::HttpStatus(code, url) => write!(f, "HTTP {} from {}", code, url),
            FetchError::ParseError(msg) => write!(f, "Unexpected response: {}", msg),
            FetchError::CacheError(msg) => write!(f, "Cache error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<CacheError> for FetchError {
    fn from(e: CacheError) -> Self {
        FetchError::CacheError(e.to_string())
    }
}

// === SyncError ===

/// Errors related to syncing the upstream bookmark manager into the cache.
#[derive(Debug)]
pub enum SyncError {
    /// Sync cannot start because the config is incomplete.
    ConfigError(String),
    /// A network error occurred while talking to the upstream API.
    NetworkError(String),
    /// The upstream API returned an error or an unexpected payload.
    ApiError(String),
    /// Writing to the cache failed.
    DatabaseError(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::ConfigError(msg) => write!(f, "Sync config error: {}", msg),
            SyncError::NetworkError(msg) => write!(f, "Sync network error: {}", msg),
            SyncError::ApiError(msg) => write!(f, "Sync API error: {}", msg),
            SyncError::DatabaseError(msg) => write!(f, "Sync database error: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<CacheError> for SyncError {
    fn from(e: CacheError) -> Self {
        SyncError::DatabaseError(e.to_string())
    }
}

// === PreferencesError ===

/// Errors related to persisting the column layout.
#[derive(Debug)]
pub enum PreferencesError {
    /// An I/O error occurred while writing the local fallback or config file.
    IoError(String),
    /// Failed to serialize or deserialize preferences.
    SerializationError(String),
    /// The preferences endpoint could not be reached.
    NetworkError(String),
    /// The preferences endpoint answered with a non-success status.
    Rejected(u16),
}

impl fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferencesError::IoError(msg) => write!(f, "Preferences I/O error: {}", msg),
            PreferencesError::SerializationError(msg) => {
                write!(f, "Preferences serialization error: {}", msg)
            }
            PreferencesError::NetworkError(msg) => {
                write!(f, "Preferences network error: {}", msg)
            }
            PreferencesError::Rejected(code) => {
                write!(f, "Preferences endpoint rejected save: HTTP {}", code)
            }
        }
    }
}

impl std::error::Error for PreferencesError {}

// === ReorderError ===

/// Errors related to drag-and-drop of list cards.
#[derive(Debug, PartialEq, Eq)]
pub enum ReorderError {
    /// The list is not a root-level card and cannot be dragged.
    NotDraggable(String),
    /// A drag gesture is already in progress.
    DragInProgress(String),
    /// The column index does not exist.
    ColumnOutOfRange(usize),
}

impl fmt::Display for ReorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReorderError::NotDraggable(id) => write!(f, "List is not draggable: {}", id),
            ReorderError::DragInProgress(id) => write!(f, "Already dragging list: {}", id),
            ReorderError::ColumnOutOfRange(index) => {
                write!(f, "Column index out of range: {}", index)
            }
        }
    }
}

impl std::error::Error for ReorderError {}

// === StartupError ===

/// Errors that end a dashboard load and are shown to the end user.
#[derive(Debug)]
pub enum StartupError {
    /// The configuration resource is missing or invalid.
    ConfigUnavailable(String),
    /// The bookmark data endpoints could not be read.
    DataUnavailable(String),
    /// The cache has never completed a sync; the page reloads itself.
    NotYetSynced,
}

impl StartupError {
    /// Heading for the full-page error state.
    pub fn title(&self) -> &'static str {
        match self {
            StartupError::ConfigUnavailable(_) => "Configuration Error",
            StartupError::DataUnavailable(_) => "Unable to Load Bookmarks",
            StartupError::NotYetSynced => "Syncing Bookmarks",
        }
    }

    /// Body text for the full-page error state.
    pub fn message(&self) -> String {
        match self {
            StartupError::ConfigUnavailable(msg) => format!(
                "Could not load config.json ({}). Check that the config file exists and names your KaraKeep instance.",
                msg
            ),
            StartupError::DataUnavailable(msg) => {
                format!("The bookmark cache could not be read ({}).", msg)
            }
            StartupError::NotYetSynced => {
                "The first sync has not finished yet. This page will reload shortly.".to_string()
            }
        }
    }

    /// `Some(delay)` when the page should reload itself instead of stopping.
    pub fn auto_reload_after(&self) -> Option<Duration> {
        match self {
            StartupError::NotYetSynced => Some(NOT_SYNCED_RELOAD_DELAY),
            _ => None,
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

impl std::error::Error for StartupError {}
