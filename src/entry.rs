//! Log levels and entries
//!
//! The data model shared by every logging backend: an ordered severity
//! scale and the immutable entry triple.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a log entry
///
/// Levels are totally ordered from `Debug` (lowest) to `Error` (highest);
/// filtering is always a `>=` comparison against a minimum level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
}

impl LogLevel {
    /// Get the display name used in formatted log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Numeric value backing this level
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Map a numeric value back to a level
    ///
    /// Callers that address levels numerically use `0..=3`; anything else
    /// returns `None`.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(LogLevel::Debug),
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Warning),
            3 => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// A single log entry
///
/// Immutable once created: backends append entries and filter them on the
/// way out, but never re-tag or reorder them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity the entry was recorded at
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Arbitrary context value supplied by the caller, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>, context: Option<Value>) -> Self {
        Self {
            level,
            message: message.into(),
            context,
        }
    }
}
