//! In-memory test doubles for the backend ports.
//!
//! These implementations are intended for:
//! - Unit/integration tests of the dispatch engine
//! - Counting backend resolutions under concurrent first use
//! - Injecting resolution and emission failures

use crate::errors::{emit_error, resolution_error};
use logbridge_ports::{BackendResolver, Level, LogBackend, LogEntry};
use logbridge_shared::{ErrorEnvelope, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

type EnablementFn = dyn Fn(&str, Level) -> bool + Send + Sync;

/// A backend that enables nothing and discards everything.
#[derive(Debug, Default)]
pub struct NoopBackend;

impl LogBackend for NoopBackend {
    fn is_enabled(&self, _name: &str, _level: Level) -> bool {
        false
    }

    fn emit(&self, _entry: LogEntry) -> Result<()> {
        Ok(())
    }
}

/// A backend that records every emitted entry.
pub struct RecordingBackend {
    enabled: Box<EnablementFn>,
    entries: Mutex<Vec<LogEntry>>,
    queries: AtomicUsize,
    fail_emits: AtomicBool,
}

impl RecordingBackend {
    /// Create a backend whose enablement is decided by `enabled`.
    pub fn new(enabled: impl Fn(&str, Level) -> bool + Send + Sync + 'static) -> Self {
        Self {
            enabled: Box::new(enabled),
            entries: Mutex::new(Vec::new()),
            queries: AtomicUsize::new(0),
            fail_emits: AtomicBool::new(false),
        }
    }

    /// Enable every level for every logger.
    pub fn accepting_all() -> Self {
        Self::new(|_, _| true)
    }

    /// Enable `level >= threshold` for every logger.
    pub fn at_threshold(threshold: Level) -> Self {
        Self::new(move |_, level| level >= threshold)
    }

    /// Make every following `emit` fail (or succeed again).
    pub fn fail_emits(&self, fail: bool) {
        self.fail_emits.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the recorded entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the recorded entries.
    pub fn take(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of recorded entries.
    pub fn emit_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of enablement queries answered.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for RecordingBackend {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("RecordingBackend")
            .field("emit_count", &self.emit_count())
            .field("query_count", &self.query_count())
            .finish_non_exhaustive()
    }
}

impl LogBackend for RecordingBackend {
    fn is_enabled(&self, name: &str, level: Level) -> bool {
        self.queries.fetch_add(1, Ordering::SeqCst);
        (self.enabled)(name, level)
    }

    fn emit(&self, entry: LogEntry) -> Result<()> {
        if self.fail_emits.load(Ordering::SeqCst) {
            return Err(emit_error(entry.logger_name()));
        }
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
        Ok(())
    }
}

/// A resolver that hands out a fixed backend and counts resolutions.
pub struct CountingResolver {
    backend: Arc<dyn LogBackend>,
    resolutions: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl CountingResolver {
    /// Create a resolver returning `backend`.
    pub fn new(backend: Arc<dyn LogBackend>) -> Self {
        Self {
            backend,
            resolutions: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    /// Sleep for `delay` inside every resolution, widening race windows.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared counter of completed resolutions.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.resolutions)
    }

    /// Number of resolutions so far.
    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }
}

impl BackendResolver for CountingResolver {
    fn resolve(&self) -> Result<Arc<dyn LogBackend>> {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.backend))
    }
}

/// A resolver that always fails and counts attempts.
#[derive(Debug, Default)]
pub struct FailingResolver {
    attempts: Arc<AtomicUsize>,
    error: Option<ErrorEnvelope>,
}

impl FailingResolver {
    /// Fail with the default resolution error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `error` instead of the default.
    #[must_use]
    pub fn with_error(mut self, error: ErrorEnvelope) -> Self {
        self.error = Some(error);
        self
    }

    /// Shared counter of attempted resolutions.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.attempts)
    }

    /// Number of attempted resolutions.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl BackendResolver for FailingResolver {
    fn resolve(&self) -> Result<Arc<dyn LogBackend>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone().unwrap_or_else(resolution_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logbridge_ports::LogRecord;
    use logbridge_shared::ErrorCode;

    #[test]
    fn recording_backend_counts_queries_and_entries() -> Result<()> {
        let backend = RecordingBackend::at_threshold(Level::Info);
        assert!(!backend.is_enabled("svc", Level::Debug));
        assert!(backend.is_enabled("svc", Level::Info));
        assert_eq!(backend.query_count(), 2);

        backend.emit(LogEntry::Normalized(LogRecord::new("svc", Level::Info)))?;
        assert_eq!(backend.emit_count(), 1);
        assert_eq!(backend.take().len(), 1);
        assert_eq!(backend.emit_count(), 0);
        Ok(())
    }

    #[test]
    fn recording_backend_failure_is_switchable() {
        let backend = RecordingBackend::accepting_all();
        backend.fail_emits(true);
        let failed = backend.emit(LogEntry::Normalized(LogRecord::new("svc", Level::Warn)));
        assert_eq!(failed.err().map(|error| error.code), Some(ErrorCode::emit_failed()));

        backend.fail_emits(false);
        let recovered = backend.emit(LogEntry::Normalized(LogRecord::new("svc", Level::Warn)));
        assert!(recovered.is_ok());
        assert_eq!(backend.emit_count(), 1);
    }

    #[test]
    fn resolvers_count_calls() {
        let counting = CountingResolver::new(Arc::new(NoopBackend));
        assert!(counting.resolve().is_ok());
        assert!(counting.resolve().is_ok());
        assert_eq!(counting.resolutions(), 2);

        let failing = FailingResolver::new();
        let error = failing.resolve().err();
        assert_eq!(error.map(|error| error.code), Some(ErrorCode::resolution_failed()));
        assert_eq!(failing.attempts(), 1);
    }
}
