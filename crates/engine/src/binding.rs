//! Lazy, exactly-once binding to the backend engine.

use logbridge_ports::{BackendResolver, LogBackend};
use logbridge_shared::Result;
use std::fmt;
use std::sync::{Arc, OnceLock};

const TARGET: &str = "logbridge::binding";

/// Process-wide connection to a backend, resolved on first use.
///
/// The resolver runs at most once. Concurrent first callers block until it
/// finishes; its outcome, success or failure, is kept for every later call.
pub struct BackendBinding {
    resolver: Box<dyn BackendResolver>,
    slot: OnceLock<Result<Arc<dyn LogBackend>>>,
}

impl BackendBinding {
    /// Create an unresolved binding.
    pub fn new(resolver: impl BackendResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            slot: OnceLock::new(),
        }
    }

    /// Create a binding that is already resolved to `backend`.
    pub fn resolved(backend: Arc<dyn LogBackend>) -> Self {
        let resolver = {
            let backend = Arc::clone(&backend);
            move || -> Result<Arc<dyn LogBackend>> { Ok(Arc::clone(&backend)) }
        };
        Self {
            resolver: Box::new(resolver),
            slot: OnceLock::from(Ok(backend)),
        }
    }

    /// Resolve the backend if needed and return it.
    ///
    /// A failed resolution is not retried: every call returns the same error.
    pub fn ensure_initialized(&self) -> Result<Arc<dyn LogBackend>> {
        match self.slot.get_or_init(|| self.resolve_once()) {
            Ok(backend) => Ok(Arc::clone(backend)),
            Err(error) => Err(error.clone()),
        }
    }

    /// Returns true once resolution has completed, successfully or not.
    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }

    fn resolve_once(&self) -> Result<Arc<dyn LogBackend>> {
        let outcome = self.resolver.resolve();
        match &outcome {
            Ok(_) => tracing::debug!(target: TARGET, "backend resolved"),
            Err(error) => tracing::error!(
                target: TARGET,
                code = %error.code,
                message = %error.message,
                "backend resolution failed"
            ),
        }
        outcome
    }
}

impl fmt::Debug for BackendBinding {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.slot.get() {
            None => "unresolved",
            Some(Ok(_)) => "resolved",
            Some(Err(_)) => "failed",
        };
        formatter
            .debug_struct("BackendBinding")
            .field("state", &state)
            .finish_non_exhaustive()
    }
}
