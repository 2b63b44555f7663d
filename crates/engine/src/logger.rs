//! Logger instances: level gating and call normalization.

use crate::event_builder::LoggingEventBuilder;
use logbridge_domain::{Level, LogArg, LogEntry, LogRecord, LoggingEvent, Marker, Throwable};
use logbridge_ports::LogBackend;
use logbridge_shared::Result;
use std::fmt;
use std::sync::Arc;

/// Placeholder reported as the caller boundary; no stack inspection is done.
pub const UNKNOWN_CALLER: &str = "unknown";

/// A named logger bound to a resolved backend.
///
/// Holds no state besides its name, so it can be cloned, shared across threads
/// and kept indefinitely.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    backend: Arc<dyn LogBackend>,
}

macro_rules! level_methods {
    ($level:expr, $log:ident, $with_marker:ident, $with_cause:ident, $is_enabled:ident, $at:ident) => {
        #[doc = concat!("Log `pattern` with `arguments` at `", stringify!($log), "`.")]
        pub fn $log(&self, pattern: &str, arguments: Vec<LogArg>) -> Result<()> {
            if !self.is_level_enabled($level) {
                return Ok(());
            }
            self.log_normalized_call($level, None, Some(pattern), arguments, None)
        }

        #[doc = concat!("Log at `", stringify!($log), "` tagged with `marker`.")]
        pub fn $with_marker(
            &self,
            marker: &Arc<Marker>,
            pattern: &str,
            arguments: Vec<LogArg>,
        ) -> Result<()> {
            if !self.is_level_enabled($level) {
                return Ok(());
            }
            self.log_normalized_call(
                $level,
                Some(Arc::clone(marker)),
                Some(pattern),
                arguments,
                None,
            )
        }

        #[doc = concat!("Log `message` at `", stringify!($log), "` with a cause.")]
        pub fn $with_cause(&self, message: &str, cause: Throwable) -> Result<()> {
            if !self.is_level_enabled($level) {
                return Ok(());
            }
            self.log_normalized_call($level, None, Some(message), Vec::new(), Some(cause))
        }

        #[doc = concat!("Returns true when `", stringify!($log), "` is enabled for this logger.")]
        pub fn $is_enabled(&self) -> bool {
            self.is_level_enabled($level)
        }

        #[doc = concat!("Fluent builder at `", stringify!($log), "`.")]
        pub fn $at(&self) -> LoggingEventBuilder<'_> {
            self.at_level($level)
        }
    };
}

impl Logger {
    /// Create a logger named `name` forwarding to `backend`.
    pub fn new(name: impl Into<Arc<str>>, backend: Arc<dyn LogBackend>) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }

    /// Logger name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ask the backend whether `level` is enabled for this logger.
    pub fn is_level_enabled(&self, level: Level) -> bool {
        self.backend.is_enabled(&self.name, level)
    }

    level_methods!(Level::Trace, trace, trace_with_marker, trace_with_cause, is_trace_enabled, at_trace);
    level_methods!(Level::Debug, debug, debug_with_marker, debug_with_cause, is_debug_enabled, at_debug);
    level_methods!(Level::Info, info, info_with_marker, info_with_cause, is_info_enabled, at_info);
    level_methods!(Level::Warn, warn, warn_with_marker, warn_with_cause, is_warn_enabled, at_warn);
    level_methods!(Level::Error, error, error_with_marker, error_with_cause, is_error_enabled, at_error);

    /// Log at a level chosen at runtime.
    pub fn log_at(
        &self,
        level: Level,
        marker: Option<&Arc<Marker>>,
        pattern: &str,
        arguments: Vec<LogArg>,
        throwable: Option<Throwable>,
    ) -> Result<()> {
        if !self.is_level_enabled(level) {
            return Ok(());
        }
        self.log_normalized_call(level, marker.cloned(), Some(pattern), arguments, throwable)
    }

    /// Fluent builder at `level`. Enablement is checked once, here.
    pub fn at_level(&self, level: Level) -> LoggingEventBuilder<'_> {
        if self.is_level_enabled(level) {
            LoggingEventBuilder::enabled(self, level)
        } else {
            LoggingEventBuilder::disabled()
        }
    }

    /// Forward a fully built event, tagged with this logger's name.
    ///
    /// Precondition: the caller already checked that `event.level` is enabled.
    pub fn log_structured_event(&self, event: LoggingEvent) -> Result<()> {
        self.backend.emit(LogEntry::Structured {
            logger_name: Arc::clone(&self.name),
            event,
        })
    }

    /// Package one legacy call into a [`LogRecord`] and forward it.
    ///
    /// Precondition: the caller already checked that `level` is enabled.
    pub fn log_normalized_call(
        &self,
        level: Level,
        marker: Option<Arc<Marker>>,
        pattern: Option<&str>,
        arguments: Vec<LogArg>,
        throwable: Option<Throwable>,
    ) -> Result<()> {
        let record = LogRecord {
            logger_name: Arc::clone(&self.name),
            level,
            marker,
            pattern: pattern.map(str::to_owned),
            arguments,
            throwable,
        };
        self.backend.emit(LogEntry::Normalized(record))
    }

    /// Name of the frame boundary used for caller detection.
    pub const fn caller_boundary_name(&self) -> &'static str {
        UNKNOWN_CALLER
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Logger")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
