//! Capturing decorator over the file logger
//!
//! Wraps a `FileLogger` and retains a structured copy of everything
//! logged, so callers (test code above all) can assert that an entry of a
//! given level was recorded without reading the file back.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::entry::{LogEntry, LogLevel};
use crate::file::FileLogger;
use crate::logger::Logger;

/// Decorator that captures `(message, context)` pairs per level
///
/// `log` delegates to the wrapped file logger first, keeping its
/// write-time threshold and file side effect intact, then records the
/// pair regardless of that threshold: entries the file drops are still
/// captured. Through the `Logger` trait this behaves like the wrapped
/// file logger; the capture surface is the inherent methods.
pub struct CapturingLogger {
    inner: FileLogger,
    captured: Mutex<BTreeMap<LogLevel, Vec<(String, Option<Value>)>>>,
}

impl CapturingLogger {
    /// Wrap a file logger
    pub fn new(inner: FileLogger) -> Self {
        Self {
            inner,
            captured: Mutex::new(BTreeMap::new()),
        }
    }

    /// The wrapped file logger
    pub fn inner(&self) -> &FileLogger {
        &self.inner
    }

    /// Captured `(message, context)` pairs
    ///
    /// With a level, answers that level's captures (empty if none).
    /// Without, answers every capture merged into one sequence, ascending
    /// by level and in insertion order within a level.
    pub fn get_logs(&self, level: Option<LogLevel>) -> Vec<(String, Option<Value>)> {
        match self.captured.lock() {
            Ok(captured) => match level {
                Some(level) => captured.get(&level).cloned().unwrap_or_default(),
                None => captured.values().flatten().cloned().collect(),
            },
            Err(_) => Vec::new(),
        }
    }

    /// Empty the capture map
    ///
    /// Does not call the wrapped logger's `clear` and does not touch the
    /// file.
    pub fn clear_logs(&self) {
        if let Ok(mut captured) = self.captured.lock() {
            captured.clear();
        }
    }
}

impl Logger for CapturingLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<Value>) {
        self.inner.log(level, message, context.clone());

        if let Ok(mut captured) = self.captured.lock() {
            captured
                .entry(level)
                .or_default()
                .push((message.to_string(), context));
        }
    }

    fn get_log(&self, min_level: LogLevel) -> Vec<LogEntry> {
        self.inner.get_log(min_level)
    }

    fn get_messages(&self, min_level: LogLevel) -> Vec<String> {
        self.inner.get_messages(min_level)
    }

    fn clear(&self) {
        self.inner.clear();
    }
}
