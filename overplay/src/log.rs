//! Injected logging sink.
//!
//! Components never reach for a process-wide logger. Each one receives a
//! [`SharedLogger`] at construction and reports through it, so tests can
//! observe or silence what a component says.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use overplay::log::{Logger, MemoryLogger, SharedLogger};
//!
//! let memory = Arc::new(MemoryLogger::new());
//! let logger: SharedLogger = memory.clone();
//! logger.debug("motion", "Motion session started");
//!
//! assert!(memory.contains("started"));
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Structured log sink.
///
/// `component` names the emitting subsystem (`"motion"`, `"geofence"`,
/// `"playback"`, ...). The convenience methods forward to [`Logger::log`].
pub trait Logger: Send + Sync {
    /// Record a message.
    fn log(&self, level: LogLevel, component: &'static str, message: &str);

    fn trace(&self, component: &'static str, message: &str) {
        self.log(LogLevel::Trace, component, message);
    }

    fn debug(&self, component: &'static str, message: &str) {
        self.log(LogLevel::Debug, component, message);
    }

    fn info(&self, component: &'static str, message: &str) {
        self.log(LogLevel::Info, component, message);
    }

    fn warn(&self, component: &'static str, message: &str) {
        self.log(LogLevel::Warn, component, message);
    }

    fn error(&self, component: &'static str, message: &str) {
        self.log(LogLevel::Error, component, message);
    }
}

/// Logger handle passed into components.
pub type SharedLogger = Arc<dyn Logger>;

/// Forwards records to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, component: &'static str, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!(component, "{}", message),
            LogLevel::Debug => tracing::debug!(component, "{}", message),
            LogLevel::Info => tracing::info!(component, "{}", message),
            LogLevel::Warn => tracing::warn!(component, "{}", message),
            LogLevel::Error => tracing::error!(component, "{}", message),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _component: &'static str, _message: &str) {}
}

/// A single captured record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub component: &'static str,
    pub message: String,
}

/// Keeps every record in memory, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all records captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Whether any record's message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|record| record.message.contains(needle))
    }

    /// Number of records at `level`.
    pub fn count_at(&self, level: LogLevel) -> usize {
        self.records()
            .iter()
            .filter(|record| record.level == level)
            .count()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, component: &'static str, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                component,
                message: message.to_string(),
            });
        }
    }
}

/// Default logger used when none is injected.
pub fn default_logger() -> SharedLogger {
    Arc::new(TracingLogger)
}
