//! The normalized record produced by the legacy call shapes.

use crate::level::Level;
use crate::marker::Marker;
use std::sync::Arc;

/// Positional argument value.
pub type LogArg = serde_json::Value;

/// Error attached to a log call.
pub type Throwable = Arc<dyn std::error::Error + Send + Sync>;

/// One log call packaged for the backend: name, level, marker, pattern,
/// ordered arguments, and cause.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Name of the emitting logger.
    pub logger_name: Arc<str>,
    /// Severity of the call.
    pub level: Level,
    /// Optional marker.
    pub marker: Option<Arc<Marker>>,
    /// Message pattern with `{}` anchors.
    pub pattern: Option<String>,
    /// Positional arguments, in call order.
    pub arguments: Vec<LogArg>,
    /// Optional cause.
    pub throwable: Option<Throwable>,
}

impl LogRecord {
    /// Record with a name and level and nothing else.
    pub fn new(logger_name: impl Into<Arc<str>>, level: Level) -> Self {
        Self {
            logger_name: logger_name.into(),
            level,
            marker: None,
            pattern: None,
            arguments: Vec::new(),
            throwable: None,
        }
    }

    /// Set the message pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the positional arguments.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<LogArg>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Set the marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Arc<Marker>) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Set the cause.
    #[must_use]
    pub fn with_throwable(mut self, throwable: Throwable) -> Self {
        self.throwable = Some(throwable);
        self
    }
}
