//! Fluent event builder returned by [`Logger::at_level`].
//!
//! A builder for a disabled level carries nothing: every method returns it
//! unchanged, supplier closures are never called, and `log` emits nothing.

use crate::logger::Logger;
use logbridge_domain::{KeyValuePair, Level, LogArg, LoggingEvent, Marker, Throwable};
use logbridge_shared::Result;
use std::sync::Arc;

/// Accumulates one structured event and emits it once.
#[must_use = "a builder does nothing until `log` is called"]
pub struct LoggingEventBuilder<'a> {
    pending: Option<Pending<'a>>,
}

struct Pending<'a> {
    logger: &'a Logger,
    event: LoggingEvent,
}

impl<'a> LoggingEventBuilder<'a> {
    pub(crate) fn enabled(logger: &'a Logger, level: Level) -> Self {
        Self {
            pending: Some(Pending {
                logger,
                event: LoggingEvent::new(level),
            }),
        }
    }

    pub(crate) const fn disabled() -> Self {
        Self { pending: None }
    }

    /// Returns true when this builder will emit.
    pub const fn is_enabled(&self) -> bool {
        self.pending.is_some()
    }

    fn update(mut self, apply: impl FnOnce(&mut LoggingEvent)) -> Self {
        if let Some(pending) = self.pending.as_mut() {
            apply(&mut pending.event);
        }
        self
    }

    /// Tag the event with `marker`.
    pub fn add_marker(self, marker: Arc<Marker>) -> Self {
        self.update(|event| event.markers.push(marker))
    }

    /// Append a positional argument.
    pub fn add_argument(self, argument: impl Into<LogArg>) -> Self {
        self.update(|event| event.arguments.push(argument.into()))
    }

    /// Append a positional argument computed only when enabled.
    pub fn add_argument_with(self, supplier: impl FnOnce() -> LogArg) -> Self {
        self.update(|event| event.arguments.push(supplier()))
    }

    /// Attach a key/value pair.
    pub fn add_key_value(self, key: &str, value: impl Into<LogArg>) -> Self {
        self.update(|event| event.key_values.push(KeyValuePair::new(key, value.into())))
    }

    /// Attach a key/value pair whose value is computed only when enabled.
    pub fn add_key_value_with(self, key: &str, supplier: impl FnOnce() -> LogArg) -> Self {
        self.update(|event| event.key_values.push(KeyValuePair::new(key, supplier())))
    }

    /// Set the cause.
    pub fn set_cause(self, cause: Throwable) -> Self {
        self.update(|event| event.throwable = Some(cause))
    }

    /// Set the message pattern.
    pub fn set_message(self, message: impl Into<String>) -> Self {
        self.update(|event| event.message = Some(message.into()))
    }

    /// Set a message computed only when enabled.
    pub fn set_message_with(self, supplier: impl FnOnce() -> String) -> Self {
        self.update(|event| event.message = Some(supplier()))
    }

    /// Emit the accumulated event.
    pub fn log(self) -> Result<()> {
        let Some(Pending { logger, mut event }) = self.pending else {
            return Ok(());
        };
        event.caller_boundary = Some(logger.caller_boundary_name().to_owned());
        logger.log_structured_event(event)
    }

    /// Set the message and emit.
    pub fn log_message(self, message: impl Into<String>) -> Result<()> {
        self.set_message(message).log()
    }
}
