//! Unit tests for the ConfigStore.
//!
//! Uses temp directories for the config file. Covers first-run creation,
//! defaulting of optional fields, and rejection of unusable files.

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use homedash::services::config_store::{ConfigStore, ConfigStoreTrait};
use homedash::types::config::{BookmarkTarget, API_KEY_PLACEHOLDER};
use homedash::types::errors::ConfigError;

fn store_in(tmp: &TempDir) -> ConfigStore {
    ConfigStore::new(Some(tmp.path().join("config.json").to_string_lossy().to_string()))
}

/// First run writes a default file that carries the placeholder key.
#[test]
fn test_ensure_exists_creates_default() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    assert!(store.ensure_exists().unwrap());
    assert!(!store.ensure_exists().unwrap());

    let config = store.load().unwrap();
    assert_eq!(config.api_key.as_deref(), Some(API_KEY_PLACEHOLDER));
    assert_eq!(config.usable_api_key(), None);
    assert!(config.sync.enabled);
    assert_eq!(config.sync.interval_minutes, 5);
    assert_eq!(config.database.path, "/app/data/karakeep.db");
}

#[test]
fn test_load_missing_file_is_not_found() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(store_in(&tmp).load(), Err(ConfigError::NotFound(_))));
}

/// Only `karakeepUrl` is required; everything else defaults.
#[test]
fn test_minimal_config_defaults_optional_fields() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    fs::write(store.get_config_path(), json!({"karakeepUrl": "https://keep.example"}).to_string()).unwrap();

    let config = store.load().unwrap();
    assert_eq!(config.karakeep_url, "https://keep.example");
    assert_eq!(config.bookmark_target, BookmarkTarget::SameTab);
    assert_eq!(config.preferences, None);
    assert!(config.preferences_or_default().is_empty());
}

#[test]
fn test_new_tab_target() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    fs::write(
        store.get_config_path(),
        json!({"karakeepUrl": "https://keep.example", "bookmarkTarget": "_blank"}).to_string(),
    )
    .unwrap();
    assert_eq!(store.load().unwrap().bookmark_target, BookmarkTarget::NewTab);
}

#[test]
fn test_empty_url_rejected() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    fs::write(store.get_config_path(), json!({"karakeepUrl": "  "}).to_string()).unwrap();
    assert!(matches!(store.load(), Err(ConfigError::InvalidValue(_))));
}

#[test]
fn test_missing_url_rejected() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    fs::write(store.get_config_path(), "{}").unwrap();
    assert!(matches!(store.load(), Err(ConfigError::InvalidValue(_))));
}

#[test]
fn test_malformed_json_is_serialization_error() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    fs::write(store.get_config_path(), "{ nope").unwrap();
    assert!(matches!(store.load(), Err(ConfigError::SerializationError(_))));
}

#[test]
fn test_usable_api_key() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    fs::write(
        store.get_config_path(),
        json!({"karakeepUrl": "https://keep.example", "apiKey": " ak_123 "}).to_string(),
    )
    .unwrap();
    assert_eq!(store.load().unwrap().usable_api_key(), Some("ak_123"));
}

#[test]
fn test_load_or_create_on_fresh_dir() {
    let tmp = TempDir::new().unwrap();
    let config = store_in(&tmp).load_or_create().unwrap();
    assert_eq!(config.karakeep_url, "http://localhost:3000");
}
