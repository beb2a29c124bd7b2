//! Append-only file logging backend
//!
//! Formats entries as single lines and appends them to a log file,
//! filtering at write time. File I/O failures are swallowed; this backend
//! is best-effort diagnostics, never a reason to abort the caller.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;

use crate::entry::{LogEntry, LogLevel};
use crate::logger::Logger;

/// Sentinel answered by `get_log`; callers asserting on history must use a
/// backend that retains entries.
const GET_LOG_PLACEHOLDER: &str = "get_log is not available for the file logger";

/// Sentinel answered by `get_messages`.
const GET_MESSAGES_PLACEHOLDER: &str = "get_messages is not available for the file logger";

/// File-backed logging backend
///
/// Entries below the instance minimum level (`Info` unless overridden) are
/// dropped before formatting and are never recoverable. Surviving entries
/// become one newline-terminated line each:
///
/// ```text
/// [2026-08-04T09:12:45+02:00] ERROR import failed {"code":500}
/// ```
///
/// The file is created on first write and never read back; structured
/// retrieval answers a fixed placeholder instead.
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
    min_level: LogLevel,
}

impl FileLogger {
    /// Create a file logger appending to `path` with the default `Info` threshold
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            min_level: LogLevel::Info,
        }
    }

    /// Create a file logger with an explicit write-time threshold
    pub fn with_min_level(path: impl Into<PathBuf>, min_level: LogLevel) -> Self {
        Self {
            path: path.into(),
            min_level,
        }
    }

    /// Path of the target log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Minimum level an entry needs to reach the file
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Format one log line: local timestamp with UTC offset, level name,
    /// message and, when present, the serialized context
    fn format_line(level: LogLevel, message: &str, context: Option<&Value>) -> String {
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%:z");
        match context {
            Some(value) => format!("[{}] {} {} {}", timestamp, level.as_str(), message, value),
            None => format!("[{}] {} {}", timestamp, level.as_str(), message),
        }
    }
}

impl Logger for FileLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<Value>) {
        if level < self.min_level {
            return;
        }

        let line = Self::format_line(level, message, context.as_ref());
        match OpenOptions::new().create(true).append(true).open(&self.path) {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", line) {
                    tracing::debug!("failed to append to log file {}: {}", self.path.display(), e);
                }
            }
            Err(e) => {
                tracing::debug!("failed to open log file {}: {}", self.path.display(), e);
            }
        }
    }

    fn get_log(&self, _min_level: LogLevel) -> Vec<LogEntry> {
        vec![LogEntry::new(LogLevel::Debug, GET_LOG_PLACEHOLDER, None)]
    }

    fn get_messages(&self, _min_level: LogLevel) -> Vec<String> {
        vec![GET_MESSAGES_PLACEHOLDER.to_string()]
    }

    fn clear(&self) {
        if !self.path.exists() {
            return;
        }
        if let Err(e) = OpenOptions::new().write(true).truncate(true).open(&self.path) {
            tracing::debug!("failed to truncate log file {}: {}", self.path.display(), e);
        }
    }
}
