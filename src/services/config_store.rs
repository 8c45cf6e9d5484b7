// HomeDash Config Store
// Loads `config.json`, writes the default file on first run, and rewrites the
// `preferences` key when the layout is saved. Every other key in the file is
// left untouched on save.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::platform;
use crate::types::config::DashboardConfig;
use crate::types::errors::ConfigError;
use crate::types::layout::LayoutPreference;

/// Trait defining the config store interface.
pub trait ConfigStoreTrait {
    fn ensure_exists(&self) -> Result<bool, ConfigError>;
    fn load(&self) -> Result<DashboardConfig, ConfigError>;
    fn load_or_create(&self) -> Result<DashboardConfig, ConfigError>;
    fn save_preferences(&self, preferences: &LayoutPreference) -> Result<(), ConfigError>;
    fn get_config_path(&self) -> &str;
}

/// Config store backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: String,
}

impl ConfigStore {
    /// Creates a new ConfigStore.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `config.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("config.json")
                .to_string_lossy()
                .to_string(),
        };
        Self { config_path }
    }

    fn read_value(&self) -> Result<serde_json::Value, ConfigError> {
        let path = Path::new(&self.config_path);
        if !path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;
        serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
        })
    }

    fn write_value(&self, value: &serde_json::Value) -> Result<(), ConfigError> {
        let path = Path::new(&self.config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }
        let json = serde_json::to_string_pretty(value).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })?;
        fs::write(path, json)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config file: {}", e)))
    }
}

impl ConfigStoreTrait for ConfigStore {
    /// Writes the default config if no file exists. Returns `true` if one was created.
    fn ensure_exists(&self) -> Result<bool, ConfigError> {
        if Path::new(&self.config_path).exists() {
            return Ok(false);
        }
        let defaults = serde_json::to_value(DashboardConfig::default()).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize defaults: {}", e))
        })?;
        self.write_value(&defaults)?;
        info!(path = %self.config_path, "created default config");
        warn!("edit the config file and add your KaraKeep API key");
        Ok(true)
    }

    /// Parses the config file, defaulting optional fields.
    fn load(&self) -> Result<DashboardConfig, ConfigError> {
        let value = self.read_value()?;
        let config: DashboardConfig = serde_json::from_value(value)
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid config: {}", e)))?;
        if config.karakeep_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue("karakeepUrl is empty".to_string()));
        }
        Ok(config)
    }

    fn load_or_create(&self) -> Result<DashboardConfig, ConfigError> {
        self.ensure_exists()?;
        self.load()
    }

    /// Replaces the `preferences` key, preserving the rest of the file.
    fn save_preferences(&self, preferences: &LayoutPreference) -> Result<(), ConfigError> {
        let mut value = match self.read_value() {
            Ok(v) => v,
            Err(ConfigError::NotFound(_)) => serde_json::to_value(DashboardConfig::default())
                .map_err(|e| ConfigError::SerializationError(e.to_string()))?,
            Err(e) => return Err(e),
        };
        let prefs = serde_json::to_value(preferences)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        match value.as_object_mut() {
            Some(map) => {
                map.insert("preferences".to_string(), prefs);
            }
            None => {
                return Err(ConfigError::InvalidValue(
                    "config root is not an object".to_string(),
                ))
            }
        }
        self.write_value(&value)
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
