//! Level macros: lazy arguments, markers, causes.

use logbridge_facade::{BackendBinding, Level, LogBackend, LogEntry, LoggerRegistry, Marker};
use logbridge_testkit::RecordingBackend;
use serde::Serialize;
use serde_json::json;
use std::cell::Cell;
use std::error::Error;
use std::io;
use std::sync::Arc;

fn registry_at(threshold: Level) -> Result<(Arc<RecordingBackend>, LoggerRegistry), Box<dyn Error>> {
    let backend = Arc::new(RecordingBackend::at_threshold(threshold));
    let shared: Arc<dyn LogBackend> = backend.clone();
    let registry = LoggerRegistry::new(&BackendBinding::resolved(shared))?;
    Ok((backend, registry))
}

#[derive(Serialize)]
struct Order {
    id: u32,
    total_cents: u64,
}

#[test]
fn disabled_level_skips_argument_evaluation() -> Result<(), Box<dyn Error>> {
    let (backend, registry) = registry_at(Level::Info)?;
    let logger = registry.get_logger("svc.macros");
    let evaluated = Cell::new(0);
    let expensive = || {
        evaluated.set(evaluated.get() + 1);
        "expensive"
    };

    logbridge_facade::debug!(logger, "value {}", expensive())?;
    logbridge_facade::trace!(logger, "value {}", expensive())?;
    assert_eq!(evaluated.get(), 0);
    assert_eq!(backend.emit_count(), 0);

    logbridge_facade::info!(logger, "value {}", expensive())?;
    assert_eq!(evaluated.get(), 1);
    assert_eq!(backend.emit_count(), 1);
    Ok(())
}

#[test]
fn arguments_are_serialized_in_order() -> Result<(), Box<dyn Error>> {
    let (backend, registry) = registry_at(Level::Trace)?;
    let logger = registry.get_logger("svc.orders");
    let order = Order {
        id: 7,
        total_cents: 1250,
    };

    logbridge_facade::warn!(logger, "order {} for {}", order, "alice")?;

    let entries = backend.take();
    let Some(LogEntry::Normalized(record)) = entries.first() else {
        return Err("expected a normalized record".into());
    };
    assert_eq!(record.level, Level::Warn);
    assert_eq!(record.pattern.as_deref(), Some("order {} for {}"));
    assert_eq!(
        record.arguments,
        vec![json!({ "id": 7, "total_cents": 1250 }), json!("alice")]
    );
    Ok(())
}

#[test]
fn marker_and_cause_prefixes() -> Result<(), Box<dyn Error>> {
    let (backend, registry) = registry_at(Level::Trace)?;
    let logger = registry.get_logger("svc.storage");
    let audit = Arc::new(Marker::new("AUDIT"));

    logbridge_facade::error!(
        logger,
        marker = audit,
        cause = io::Error::other("disk full"),
        "write to {} failed",
        "/var/data"
    )?;
    logbridge_facade::info!(logger, marker = audit, "checkpoint")?;
    logbridge_facade::warn!(logger, cause = io::Error::other("timeout"), "retrying")?;
    logbridge_facade::log_at!(logger, Level::Debug, "runtime level {}", 1)?;

    let entries = backend.take();
    assert_eq!(entries.len(), 4);
    let marker_counts: Vec<usize> = entries.iter().map(|entry| entry.marker_names().len()).collect();
    assert_eq!(marker_counts, vec![1, 1, 0, 0]);
    let causes: Vec<Option<String>> = entries
        .iter()
        .map(|entry| entry.throwable().map(ToString::to_string))
        .collect();
    assert_eq!(
        causes,
        vec![
            Some("disk full".to_owned()),
            None,
            Some("timeout".to_owned()),
            None
        ]
    );
    Ok(())
}
