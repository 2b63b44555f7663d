//! Structured events built by the fluent API, and the backend-facing entry.

use crate::level::Level;
use crate::marker::Marker;
use crate::record::{LogArg, LogRecord, Throwable};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// One structured key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValuePair {
    /// Key.
    pub key: String,
    /// Value.
    pub value: LogArg,
}

impl KeyValuePair {
    /// Create a pair.
    pub fn new(key: impl Into<String>, value: LogArg) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A fully built structured event.
#[derive(Debug, Clone)]
pub struct LoggingEvent {
    /// Severity.
    pub level: Level,
    /// Attached markers, in the order they were added.
    pub markers: Vec<Arc<Marker>>,
    /// Message pattern.
    pub message: Option<String>,
    /// Positional arguments.
    pub arguments: Vec<LogArg>,
    /// Structured key/value pairs.
    pub key_values: Vec<KeyValuePair>,
    /// Optional cause.
    pub throwable: Option<Throwable>,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Name of the creating thread, when it has one.
    pub thread_name: Option<String>,
    /// Name of the frame boundary used for caller resolution.
    pub caller_boundary: Option<String>,
}

impl LoggingEvent {
    /// Empty event at `level`, stamped with the current time and thread name.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            markers: Vec::new(),
            message: None,
            arguments: Vec::new(),
            key_values: Vec::new(),
            throwable: None,
            timestamp_ms: now_epoch_ms(),
            thread_name: std::thread::current().name().map(str::to_owned),
            caller_boundary: None,
        }
    }
}

/// The value handed to a backend for every emission.
#[derive(Debug, Clone)]
pub enum LogEntry {
    /// Legacy call shapes, normalized.
    Normalized(LogRecord),
    /// A fluent event, forwarded unmodified and tagged with the logger name.
    Structured {
        /// Name of the emitting logger.
        logger_name: Arc<str>,
        /// The event as built by the caller.
        event: LoggingEvent,
    },
}

impl LogEntry {
    /// Name of the emitting logger.
    #[must_use]
    pub fn logger_name(&self) -> &str {
        match self {
            Self::Normalized(record) => &record.logger_name,
            Self::Structured { logger_name, .. } => logger_name,
        }
    }

    /// Severity of the entry.
    #[must_use]
    pub fn level(&self) -> Level {
        match self {
            Self::Normalized(record) => record.level,
            Self::Structured { event, .. } => event.level,
        }
    }

    /// Message pattern, if any.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Normalized(record) => record.pattern.as_deref(),
            Self::Structured { event, .. } => event.message.as_deref(),
        }
    }

    /// Positional arguments.
    #[must_use]
    pub fn arguments(&self) -> &[LogArg] {
        match self {
            Self::Normalized(record) => &record.arguments,
            Self::Structured { event, .. } => &event.arguments,
        }
    }

    /// Attached cause, if any.
    #[must_use]
    pub fn throwable(&self) -> Option<&Throwable> {
        match self {
            Self::Normalized(record) => record.throwable.as_ref(),
            Self::Structured { event, .. } => event.throwable.as_ref(),
        }
    }

    /// Names of every attached marker.
    #[must_use]
    pub fn marker_names(&self) -> Vec<&str> {
        match self {
            Self::Normalized(record) => record.marker.iter().map(|marker| marker.name()).collect(),
            Self::Structured { event, .. } => {
                event.markers.iter().map(|marker| marker.name()).collect()
            },
        }
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| {
            u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
        })
}
