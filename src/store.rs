//! Durable key-value storage for log entries
//!
//! The cached logger persists its in-memory entries through the
//! `EntryStore` contract. Implementations report failure by degrading:
//! an absent or unreadable value reads as "nothing stored", a failed
//! write answers `false`. Nothing here propagates an error into the
//! logging path.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{Context, Result};

use crate::entry::LogEntry;

/// Storage contract consumed by the cached logger
pub trait EntryStore: Send + Sync {
    /// Entries stored under `key`, if any
    fn get(&self, key: &str) -> Option<Vec<LogEntry>>;

    /// Replace the entries stored under `key`
    fn set(&self, key: &str, entries: &[LogEntry]) -> bool;

    /// Remove the value stored under `key`
    ///
    /// Removing an absent key is a success.
    fn delete(&self, key: &str) -> bool;
}

/// Process-lifetime in-memory store
///
/// Keeps every key in a map for the lifetime of the process. Doubles as
/// the storage stand-in for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Vec<LogEntry>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<LogEntry>> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, entries: &[LogEntry]) -> bool {
        match self.values.write() {
            Ok(mut values) => {
                values.insert(key.to_string(), entries.to_vec());
                true
            }
            Err(_) => false,
        }
    }

    fn delete(&self, key: &str) -> bool {
        match self.values.write() {
            Ok(mut values) => {
                values.remove(key);
                true
            }
            Err(_) => false,
        }
    }
}

/// Store keeping every key in a single JSON file
///
/// The whole file is read and rewritten per operation. The cached logger
/// only touches storage on construction, `save` and `clear`, so the churn
/// stays low. A corrupt file reads as empty and is replaced by the next
/// `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    store_path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the JSON file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: path.into(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.store_path
    }

    fn load_all(&self) -> Result<HashMap<String, Vec<LogEntry>>> {
        if !self.store_path.exists() {
            return Ok(HashMap::new());
        }

        let content =
            fs::read_to_string(&self.store_path).context("failed to read log store file")?;

        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&content).context("failed to parse log store file")
    }

    fn save_all(&self, values: &HashMap<String, Vec<LogEntry>>) -> Result<()> {
        let content =
            serde_json::to_string_pretty(values).context("failed to serialize log store")?;

        fs::write(&self.store_path, content).context("failed to write log store file")?;

        Ok(())
    }
}

impl EntryStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Vec<LogEntry>> {
        match self.load_all() {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                tracing::debug!("log store read failed: {:#}", e);
                None
            }
        }
    }

    fn set(&self, key: &str, entries: &[LogEntry]) -> bool {
        let mut values = self.load_all().unwrap_or_else(|e| {
            tracing::debug!("log store read failed, starting fresh: {:#}", e);
            HashMap::new()
        });

        values.insert(key.to_string(), entries.to_vec());

        match self.save_all(&values) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("log store write failed: {:#}", e);
                false
            }
        }
    }

    fn delete(&self, key: &str) -> bool {
        let mut values = match self.load_all() {
            Ok(values) => values,
            Err(e) => {
                tracing::debug!("log store read failed: {:#}", e);
                return false;
            }
        };

        if values.remove(key).is_none() {
            return true;
        }

        match self.save_all(&values) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("log store delete failed: {:#}", e);
                false
            }
        }
    }
}
