//! Backend that forwards every entry to the `tracing` dispatcher.
//!
//! Each emission becomes one `tracing` event at target [`BRIDGE_TARGET`] with
//! the originating logger name in the `logger` field. `tracing` needs a
//! constant level per callsite, so the five levels map to five callsites.

use crate::format::{format_message, render_cause_chain};
use logbridge_config::LevelRules;
use logbridge_domain::Level;
use logbridge_ports::{LogBackend, LogEntry};
use logbridge_shared::Result;
use serde_json::{Map, Value};

/// Target of every forwarded event.
pub const BRIDGE_TARGET: &str = "logbridge::bridge";

/// Backend forwarding entries to `tracing`.
#[derive(Debug, Clone)]
pub struct TracingBackend {
    rules: LevelRules,
}

impl TracingBackend {
    /// Create a forwarder gated by `rules`.
    #[must_use]
    pub const fn new(rules: LevelRules) -> Self {
        Self { rules }
    }
}

struct Forwarded {
    logger: String,
    message: String,
    markers: Option<String>,
    key_values: Option<String>,
    error: Option<String>,
}

impl Forwarded {
    fn from_entry(entry: &LogEntry) -> Self {
        let message = entry
            .pattern()
            .map(|pattern| format_message(pattern, entry.arguments()))
            .unwrap_or_default();
        let markers = entry.marker_names();
        let markers = (!markers.is_empty()).then(|| markers.join(","));

        let key_values = match entry {
            LogEntry::Structured { event, .. } if !event.key_values.is_empty() => {
                let fields: Map<String, Value> = event
                    .key_values
                    .iter()
                    .map(|pair| (pair.key.clone(), pair.value.clone()))
                    .collect();
                Some(Value::Object(fields).to_string())
            },
            _ => None,
        };

        let error = entry
            .throwable()
            .map(|cause| render_cause_chain(cause.as_ref()).join(": "));

        Self {
            logger: entry.logger_name().to_owned(),
            message,
            markers,
            key_values,
            error,
        }
    }
}

macro_rules! forward {
    ($level:expr, $fields:ident) => {
        tracing::event!(
            target: BRIDGE_TARGET,
            $level,
            logger = $fields.logger.as_str(),
            markers = $fields.markers.as_deref(),
            fields = $fields.key_values.as_deref(),
            error = $fields.error.as_deref(),
            "{}",
            $fields.message
        )
    };
}

impl LogBackend for TracingBackend {
    fn is_enabled(&self, name: &str, level: Level) -> bool {
        self.rules.allows(name, level)
    }

    fn emit(&self, entry: LogEntry) -> Result<()> {
        let forwarded = Forwarded::from_entry(&entry);
        match entry.level() {
            Level::Trace => forward!(tracing::Level::TRACE, forwarded),
            Level::Debug => forward!(tracing::Level::DEBUG, forwarded),
            Level::Info => forward!(tracing::Level::INFO, forwarded),
            Level::Warn => forward!(tracing::Level::WARN, forwarded),
            Level::Error => forward!(tracing::Level::ERROR, forwarded),
        }
        Ok(())
    }
}
