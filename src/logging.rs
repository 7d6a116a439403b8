//! Leveled log lines emitted by the transport.
//!
//! The client does not pick a logging framework for you: it writes plain text lines
//! to a [`LogSink`]. The default sink forwards them to [`tracing`].

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

/// Verbosity of the client.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum LogLevel {
    /// No logging at all.
    Silent = 0,
    /// Errors only.
    Errors = 1,
    /// Errors and informational lines.
    Info = 2,
    /// Errors, informational lines and debug lines (including response bodies).
    Debug = 3,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LogLevel::Silent),
            1 => Ok(LogLevel::Errors),
            2 => Ok(LogLevel::Info),
            3 => Ok(LogLevel::Debug),
            other => Err(format!("invalid log level {}, expected 0 to 3", other)),
        }
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level as u8
    }
}

/// Destination of the log lines. Must tolerate concurrent writes.
pub trait LogSink: Send + Sync {
    fn write(&self, level: LogLevel, line: &str);
}

impl<F> LogSink for F
where
    F: Fn(LogLevel, &str) + Send + Sync,
{
    fn write(&self, level: LogLevel, line: &str) {
        self(level, line)
    }
}

/// Sink forwarding every line as a `tracing` event of the matching level, under target
/// `bri_rust`.
///
/// Nothing is printed unless the application installs a `tracing` subscriber, for example
/// `tracing_subscriber::fmt::init()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Silent => {}
            LogLevel::Errors => tracing::error!(target: "bri_rust", "{}", line),
            LogLevel::Info => tracing::info!(target: "bri_rust", "{}", line),
            LogLevel::Debug => tracing::debug!(target: "bri_rust", "{}", line),
        }
    }
}

/// Sink discarding everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn write(&self, _level: LogLevel, _line: &str) {}
}

/// A sink paired with the configured level. Lines above the level are never formatted.
#[derive(Clone)]
pub struct Logger {
    level: LogLevel,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new(level: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        Self { level, sink }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn error(&self, line: impl FnOnce() -> String) {
        self.log(LogLevel::Errors, line)
    }

    pub fn info(&self, line: impl FnOnce() -> String) {
        self.log(LogLevel::Info, line)
    }

    pub fn debug(&self, line: impl FnOnce() -> String) {
        self.log(LogLevel::Debug, line)
    }

    fn log(&self, level: LogLevel, line: impl FnOnce() -> String) {
        if level != LogLevel::Silent && self.level >= level {
            self.sink.write(level, &line());
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::default(), Arc::new(TracingSink))
    }
}

impl Debug for Logger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
