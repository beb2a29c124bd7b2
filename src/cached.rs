//! In-memory logging backend with deferred persistence
//!
//! Entries accumulate in memory and only reach durable storage on an
//! explicit `save`. Between saves the in-memory copy is the source of
//! truth and the stored copy is stale.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::entry::{LogEntry, LogLevel};
use crate::logger::Logger;
use crate::store::EntryStore;

/// Accumulating backend whose entries become durable only on [`save`]
///
/// Construction loads whatever a prior instance persisted under the same
/// storage key, so one unit of work can pick up where the last one left
/// off. Entries recorded after the last `save` are lost if the process
/// ends first; callers flush at the end of a unit of work.
///
/// [`save`]: CachedLogger::save
pub struct CachedLogger {
    store: Arc<dyn EntryStore>,
    key: String,
    entries: Mutex<Vec<LogEntry>>,
}

impl CachedLogger {
    /// Create a cached logger, loading prior entries stored under `key`
    ///
    /// An absent or malformed stored value starts the logger empty.
    pub fn new(store: Arc<dyn EntryStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = store.get(&key).unwrap_or_default();
        Self {
            store,
            key,
            entries: Mutex::new(entries),
        }
    }

    /// Storage key the entries are persisted under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the in-memory entries to durable storage, replacing any prior value
    ///
    /// This is the only path by which accumulated entries become durable.
    pub fn save(&self) -> bool {
        match self.entries.lock() {
            Ok(entries) => self.store.set(&self.key, &entries),
            Err(_) => false,
        }
    }
}

impl Logger for CachedLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<Value>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry::new(level, message, context));
        }
    }

    /// Read-time filtering: each entry keeps the level it was recorded
    /// with, so changing the query minimum never re-tags old entries.
    fn get_log(&self, min_level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.level >= min_level)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Empties the in-memory entries and deletes the durable key
    /// immediately, not on the next `save`.
    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
        self.store.delete(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use serde_json::json;
    use tempfile::TempDir;

    fn logger_with_store() -> (CachedLogger, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let logger = CachedLogger::new(store.clone(), "k1");
        (logger, store)
    }

    #[test]
    fn test_get_log_filters_by_entry_level() {
        let (logger, _store) = logger_with_store();
        logger.debug("d");
        logger.info("i");
        logger.warning("w");
        logger.error("e");

        // every minimum yields exactly the subsequence at or above it
        assert_eq!(logger.get_log(LogLevel::Debug).len(), 4);
        assert_eq!(logger.get_log(LogLevel::Info).len(), 3);
        assert_eq!(logger.get_log(LogLevel::Warning).len(), 2);
        assert_eq!(logger.get_log(LogLevel::Error).len(), 1);

        let warnings_and_up = logger.get_log(LogLevel::Warning);
        assert_eq!(warnings_and_up[0].message, "w");
        assert_eq!(warnings_and_up[1].message, "e");
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let (logger, _store) = logger_with_store();
        for i in 0..5 {
            logger.info(&format!("msg {}", i));
        }

        let messages = logger.get_messages(LogLevel::Debug);
        assert_eq!(messages, vec!["msg 0", "msg 1", "msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn test_log_does_not_touch_storage_until_save() {
        let (logger, store) = logger_with_store();
        logger.error("in memory only");

        assert_eq!(store.get("k1"), None);

        assert!(logger.save());
        assert_eq!(store.get("k1").unwrap().len(), 1);
    }

    #[test]
    fn test_save_then_reconstruct_round_trip() {
        let (logger, store) = logger_with_store();
        logger.info("started");
        logger.log(LogLevel::Error, "failed", Some(json!({"code": 500})));
        let before = logger.get_log(LogLevel::Debug);

        assert!(logger.save());

        let reloaded = CachedLogger::new(store, "k1");
        assert_eq!(reloaded.get_log(LogLevel::Debug), before);
    }

    #[test]
    fn test_without_save_new_instance_starts_empty() {
        let (logger, store) = logger_with_store();
        logger.error("never flushed");

        let reloaded = CachedLogger::new(store, "k1");
        assert!(reloaded.get_log(LogLevel::Debug).is_empty());
    }

    #[test]
    fn test_clear_empties_memory_and_deletes_key() {
        let (logger, store) = logger_with_store();
        logger.info("kept until clear");
        logger.save();

        logger.clear();

        assert!(logger.get_log(LogLevel::Debug).is_empty());
        assert_eq!(store.get("k1"), None);

        // clearing an already-empty logger is a no-op success
        logger.clear();
        assert!(logger.get_log(LogLevel::Debug).is_empty());
    }

    #[test]
    fn test_save_overwrites_prior_value() {
        let (logger, store) = logger_with_store();
        logger.info("first");
        logger.save();
        logger.info("second");
        logger.save();

        let stored = store.get("k1").unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].message, "second");
    }

    #[test]
    fn test_round_trip_through_json_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        {
            let store = Arc::new(JsonFileStore::new(&path));
            let logger = CachedLogger::new(store, "migration");
            logger.warning("slow query");
            logger.save();
        }

        let store = Arc::new(JsonFileStore::new(&path));
        let reloaded = CachedLogger::new(store, "migration");
        assert_eq!(reloaded.get_messages(LogLevel::Debug), vec!["slow query"]);
    }

    // the numeric-level scenario used by the surrounding application
    #[test]
    fn test_numeric_level_scenario() {
        let (logger, _store) = logger_with_store();

        logger.log(LogLevel::from_value(0).unwrap(), "started", None);
        logger.log(
            LogLevel::from_value(3).unwrap(),
            "failed",
            Some(json!({"code": 500})),
        );

        assert_eq!(logger.get_messages(LogLevel::Error), vec!["failed"]);
        assert_eq!(
            logger.get_messages(LogLevel::Debug),
            vec!["started", "failed"]
        );
    }
}
