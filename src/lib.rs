//! Worklog - pluggable diagnostic logging for long-running background work
//!
//! Backends implement the [`Logger`] capability and are chosen once at
//! process start; callers record entries through the trait and query them
//! back later, filtered by minimum severity.
//!
//! - [`NullLogger`] discards everything (logging disabled)
//! - [`FileLogger`] appends formatted lines to a file, filtering at write time
//! - [`CachedLogger`] accumulates in memory, persisting only on [`CachedLogger::save`]
//! - [`CapturingLogger`] wraps a file logger and retains per-level copies for assertions

pub mod cached;
pub mod capture;
pub mod config;
pub mod entry;
pub mod file;
pub mod logger;
pub mod store;

pub use cached::CachedLogger;
pub use capture::CapturingLogger;
pub use config::{build_logger, LogConfig};
pub use entry::{LogEntry, LogLevel};
pub use file::FileLogger;
pub use logger::{Logger, NullLogger};
pub use store::{EntryStore, JsonFileStore, MemoryStore};
