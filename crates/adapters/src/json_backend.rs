//! JSON lines backend: one object per emission, written to a [`LogSink`].

use crate::format::{format_message, render_cause_chain};
use crate::log_sink::LogSink;
use logbridge_config::LevelRules;
use logbridge_domain::{Level, Throwable};
use logbridge_ports::{LogBackend, LogEntry, MdcAdapter};
use logbridge_shared::redaction::{REDACTED, is_secret_key, redact_json_value};
use logbridge_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Backend emitting one JSON line per entry.
#[derive(Clone)]
pub struct JsonBackend {
    sink: Arc<dyn LogSink>,
    rules: LevelRules,
    context: Option<Arc<dyn MdcAdapter>>,
    redact_secrets: bool,
}

impl JsonBackend {
    /// Create a JSON backend writing to `sink`, gated by `rules`.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>, rules: LevelRules) -> Self {
        Self {
            sink,
            rules,
            context: None,
            redact_secrets: true,
        }
    }

    /// Attach the diagnostic context map of the emitting thread to each line.
    #[must_use]
    pub fn with_context(mut self, context: Arc<dyn MdcAdapter>) -> Self {
        self.context = Some(context);
        self
    }

    /// Enable or disable redaction of secret-looking keys.
    #[must_use]
    pub const fn with_redaction(mut self, redact_secrets: bool) -> Self {
        self.redact_secrets = redact_secrets;
        self
    }

    fn render(&self, entry: &LogEntry) -> Value {
        let mut payload = Map::new();
        let timestamp = match entry {
            LogEntry::Structured { event, .. } => event.timestamp_ms,
            LogEntry::Normalized(_) => now_epoch_ms(),
        };
        payload.insert("timestampMs".to_string(), Value::from(timestamp));
        payload.insert(
            "level".to_string(),
            Value::String(entry.level().label().to_string()),
        );
        payload.insert(
            "logger".to_string(),
            Value::String(entry.logger_name().to_string()),
        );

        let message = entry
            .pattern()
            .map(|pattern| format_message(pattern, entry.arguments()));
        if let Some(message) = message {
            payload.insert("message".to_string(), Value::String(message));
        }

        let markers = entry.marker_names();
        if !markers.is_empty() {
            payload.insert(
                "markers".to_string(),
                Value::Array(
                    markers
                        .into_iter()
                        .map(|name| Value::String(name.to_string()))
                        .collect(),
                ),
            );
        }

        if let LogEntry::Structured { event, .. } = entry {
            if let Some(thread) = &event.thread_name {
                payload.insert("thread".to_string(), Value::String(thread.clone()));
            }
            if !event.key_values.is_empty() {
                let mut fields = Map::new();
                for pair in &event.key_values {
                    fields.insert(pair.key.clone(), pair.value.clone());
                }
                payload.insert("keyValues".to_string(), Value::Object(fields));
            }
        }

        if let Some(context) = &self.context {
            let snapshot = context.copy_of_context_map();
            if !snapshot.is_empty() {
                let fields = snapshot
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect();
                payload.insert("context".to_string(), Value::Object(fields));
            }
        }

        if let Some(cause) = entry.throwable() {
            payload.insert("error".to_string(), render_cause(cause));
        }

        let mut payload = Value::Object(payload);
        if self.redact_secrets {
            redact_payload(&mut payload);
        }
        payload
    }
}

impl LogBackend for JsonBackend {
    fn is_enabled(&self, name: &str, level: Level) -> bool {
        self.rules.allows(name, level)
    }

    fn emit(&self, entry: LogEntry) -> Result<()> {
        let payload = self.render(&entry);
        let mut line = serde_json::to_string(&payload).map_err(|error| {
            ErrorEnvelope::unexpected(
                ErrorCode::emit_failed(),
                format!("failed to encode log line: {error}"),
                ErrorClass::NonRetriable,
            )
        })?;
        line.push('\n');

        self.sink.write_line(&line).map_err(|error| {
            let class = if matches!(
                error.kind(),
                std::io::ErrorKind::Interrupted | std::io::ErrorKind::WouldBlock
            ) {
                ErrorClass::Retriable
            } else {
                ErrorClass::NonRetriable
            };
            ErrorEnvelope::unexpected(
                ErrorCode::emit_failed(),
                format!("failed to write log line: {error}"),
                class,
            )
            .with_metadata("logger", entry.logger_name())
        })
    }
}

fn render_cause(cause: &Throwable) -> Value {
    let chain = render_cause_chain(cause.as_ref());
    let mut error = Map::new();
    if let Some(message) = chain.first() {
        error.insert("message".to_string(), Value::String(message.clone()));
    }
    if chain.len() > 1 {
        error.insert(
            "causes".to_string(),
            Value::Array(chain.into_iter().skip(1).map(Value::String).collect()),
        );
    }
    Value::Object(error)
}

// Only the structured sections carry caller-chosen keys.
fn redact_payload(payload: &mut Value) {
    let Value::Object(map) = payload else {
        return;
    };
    for section in ["keyValues", "context"] {
        if let Some(Value::Object(fields)) = map.get_mut(section) {
            for (key, value) in fields.iter_mut() {
                if is_secret_key(key) {
                    *value = Value::String(REDACTED.to_string());
                } else {
                    redact_json_value(value);
                }
            }
        }
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}
