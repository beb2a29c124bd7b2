//! Logger configuration and construction
//!
//! The logger is built once at process start from a `LogConfig` and handed
//! to every component that records diagnostics; components hold the trait
//! object, never a concrete backend.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cached::CachedLogger;
use crate::entry::LogLevel;
use crate::file::FileLogger;
use crate::logger::{Logger, NullLogger};
use crate::store::JsonFileStore;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Whether logging is enabled at all; disabled yields the null backend
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Backend to construct: "file", "cached" or "null"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// File the file backend appends to
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Write-time minimum level for the file backend
    #[serde(default = "default_min_level")]
    pub min_level: LogLevel,

    /// Storage key the cached backend persists under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// JSON store file the cached backend persists into
    #[serde(default = "default_store_file")]
    pub store_file: PathBuf,
}

fn default_enabled() -> bool {
    true
}

fn default_backend() -> String {
    "file".to_string()
}

fn default_log_file() -> PathBuf {
    base_dir().join("worklog.log")
}

fn default_min_level() -> LogLevel {
    LogLevel::Info
}

fn default_storage_key() -> String {
    "worklog".to_string()
}

fn default_store_file() -> PathBuf {
    base_dir().join("worklog-store.json")
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            backend: default_backend(),
            log_file: default_log_file(),
            min_level: default_min_level(),
            storage_key: default_storage_key(),
            store_file: default_store_file(),
        }
    }
}

impl LogConfig {
    /// Load configuration from a TOML file, or return defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("failed to read logging config file")?;
            toml::from_str(&content).context("failed to parse logging config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("failed to serialize logging config")?;
        std::fs::write(path, content).context("failed to write logging config file")?;
        Ok(())
    }
}

/// Base directory for default log and store paths (~/.worklog)
/// Falls back to ./.worklog if the home directory cannot be determined
pub fn base_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".worklog"))
        .unwrap_or_else(|| {
            tracing::warn!("could not determine home directory, using current directory for logs");
            PathBuf::from(".worklog")
        })
}

/// Construct the logger described by `config`
///
/// Disabled logging always yields the null backend. An unrecognized
/// backend name falls back to the file backend rather than failing;
/// diagnostics degrade, they do not abort startup.
pub fn build_logger(config: &LogConfig) -> Box<dyn Logger> {
    if !config.enabled {
        return Box::new(NullLogger);
    }

    match config.backend.as_str() {
        "null" => Box::new(NullLogger),
        "cached" => {
            let store = Arc::new(JsonFileStore::new(&config.store_file));
            Box::new(CachedLogger::new(store, &config.storage_key))
        }
        _ => Box::new(FileLogger::with_min_level(&config.log_file, config.min_level)),
    }
}
