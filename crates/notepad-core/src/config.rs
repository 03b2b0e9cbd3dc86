//! Configuration management for notepad-mcp

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

/// File name of the notepad store when no path is configured
pub const DEFAULT_DATABASE_FILE: &str = "notepads.db";

/// Main configuration for notepad-mcp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        for path in Self::config_locations() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Get default configuration file locations, in priority order
    pub fn config_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(".notepad-mcp.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            locations.push(config_dir.join("notepad-mcp").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            locations.push(home.join(".notepad-mcp.toml"));
        }

        locations
    }

    /// Path of the notepad store
    ///
    /// Uses `storage.path` when set, otherwise `notepads.db` in the directory
    /// holding the running executable.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Self::default_database_path(),
        }
    }

    /// `notepads.db` next to the installed binary
    pub fn default_database_path() -> Result<PathBuf> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or_else(|| {
            Error::Config(format!(
                "Could not determine install directory of {}",
                exe.display()
            ))
        })?;
        Ok(dir.join(DEFAULT_DATABASE_FILE))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.server.log_level.to_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "Invalid log_level '{}': must be one of {:?}",
                self.server.log_level, valid_log_levels
            )));
        }

        if self.storage.pool_max_size == 0 {
            return Err(Error::Config(
                "Invalid pool_max_size 0: must be at least 1".to_string(),
            ));
        }

        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                return Err(Error::Config("Invalid storage path: empty".to_string()));
            }
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Explicit path of the SQLite file
    pub path: Option<PathBuf>,
    /// Maximum number of pooled SQLite connections
    pub pool_max_size: u32,
    /// SQLite busy timeout in milliseconds
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            pool_max_size: 4,
            busy_timeout_ms: 5000,
        }
    }
}
