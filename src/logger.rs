//! Logging backend contract
//!
//! Defines the `Logger` capability implemented by every backend and the
//! no-op `NullLogger` used when logging is disabled.

use serde_json::Value;

use crate::entry::{LogEntry, LogLevel};

/// Capability implemented by every logging backend
///
/// Callers pick a backend at construction time and depend on this trait
/// only; no caller may assume a concrete implementation. Methods never
/// return errors: a backend that cannot record or retrieve entries
/// degrades to doing nothing or answering empty, so logging trouble never
/// aborts the caller's primary work.
///
/// Implementations must be `Send + Sync` so a single instance can be
/// shared across worker threads.
pub trait Logger: Send + Sync {
    /// Record one entry at the given level
    fn log(&self, level: LogLevel, message: &str, context: Option<Value>);

    /// Retained entries with level `>= min_level`, in insertion order
    ///
    /// The base behavior retains nothing and answers empty. Backends that
    /// keep structured entries override this with read-time filtering;
    /// backends that keep none answer a single placeholder entry instead.
    fn get_log(&self, _min_level: LogLevel) -> Vec<LogEntry> {
        Vec::new()
    }

    /// Message component of the entries `get_log` would return, same order
    fn get_messages(&self, min_level: LogLevel) -> Vec<String> {
        self.get_log(min_level)
            .into_iter()
            .map(|entry| entry.message)
            .collect()
    }

    /// Discard all retained entries, including any durable copy
    ///
    /// Idempotent; clearing an already-empty logger is a no-op.
    fn clear(&self) {}

    /// Record a `Debug` entry with no context
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    /// Record an `Info` entry with no context
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    /// Record a `Warning` entry with no context
    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message, None);
    }

    /// Record an `Error` entry with no context
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, None);
    }
}

/// Logger that discards everything
///
/// The backend handed out when logging is administratively disabled. `log`
/// does nothing and the trait defaults make retrieval always empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: LogLevel, _message: &str, _context: Option<Value>) {
        // intentionally do nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecLogger {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl Logger for VecLogger {
        fn log(&self, level: LogLevel, message: &str, context: Option<Value>) {
            self.entries
                .lock()
                .unwrap()
                .push(LogEntry::new(level, message, context));
        }

        fn get_log(&self, min_level: LogLevel) -> Vec<LogEntry> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .filter(|entry| entry.level >= min_level)
                .cloned()
                .collect()
        }
    }

    #[test]
    fn test_convenience_methods_tag_levels() {
        let logger = VecLogger::default();
        logger.debug("d");
        logger.info("i");
        logger.warning("w");
        logger.error("e");

        let entries = logger.get_log(LogLevel::Debug);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].level, LogLevel::Debug);
        assert_eq!(entries[3].level, LogLevel::Error);
        assert!(entries.iter().all(|entry| entry.context.is_none()));
    }

    #[test]
    fn test_get_messages_derives_from_get_log() {
        let logger = VecLogger::default();
        logger.log(LogLevel::Info, "kept", Some(json!({"n": 1})));
        logger.debug("dropped");

        assert_eq!(logger.get_messages(LogLevel::Info), vec!["kept"]);
    }

    #[test]
    fn test_null_logger_retains_nothing() {
        let logger = NullLogger;
        logger.log(LogLevel::Error, "lost", Some(json!("ctx")));
        logger.error("also lost");

        assert!(logger.get_log(LogLevel::Debug).is_empty());
        assert!(logger.get_messages(LogLevel::Debug).is_empty());
    }

    #[test]
    fn test_null_logger_clear_is_noop() {
        let logger = NullLogger;
        logger.clear();
        logger.clear();
        assert!(logger.get_log(LogLevel::Debug).is_empty());
    }

    #[test]
    fn test_backends_usable_as_trait_objects() {
        let loggers: Vec<Box<dyn Logger>> = vec![Box::new(NullLogger), Box::new(VecLogger::default())];
        for logger in &loggers {
            logger.info("through the trait");
        }
        assert!(loggers[0].get_log(LogLevel::Debug).is_empty());
        assert_eq!(loggers[1].get_messages(LogLevel::Debug), vec!["through the trait"]);
    }
}
