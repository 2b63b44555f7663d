//! Backend boundary contract: the two entry points every engine exposes.

use logbridge_domain::{Level, LogEntry};
use logbridge_shared::Result;
use std::sync::Arc;

/// A logging engine as seen by the dispatch layer.
pub trait LogBackend: Send + Sync {
    /// Returns true when `level` is enabled for the logger `name`.
    ///
    /// Must be side-effect free and cheap; it runs before every call.
    fn is_enabled(&self, name: &str, level: Level) -> bool;

    /// Emit one entry.
    ///
    /// Errors reach the application caller unchanged.
    fn emit(&self, entry: LogEntry) -> Result<()>;
}

/// Produces the backend the first time the binding is used.
pub trait BackendResolver: Send + Sync {
    /// Resolve the backend. Called at most once per binding.
    fn resolve(&self) -> Result<Arc<dyn LogBackend>>;
}

impl<F> BackendResolver for F
where
    F: Fn() -> Result<Arc<dyn LogBackend>> + Send + Sync,
{
    fn resolve(&self) -> Result<Arc<dyn LogBackend>> {
        self()
    }
}
