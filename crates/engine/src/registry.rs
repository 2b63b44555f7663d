//! Logger registry: one cached [`Logger`] per name.

use crate::binding::BackendBinding;
use crate::logger::Logger;
use logbridge_ports::LogBackend;
use logbridge_shared::{NamedCache, Result, get_or_create};
use std::fmt;
use std::sync::Arc;

const TARGET: &str = "logbridge::registry";

/// Produces loggers by name.
pub trait LoggerFactory: Send + Sync {
    /// Logger for `name`, created on first request.
    fn get_logger(&self, name: &str) -> Arc<Logger>;
}

/// Concurrent cache of loggers keyed by name.
///
/// Concurrent first requests for the same name yield one instance; requests
/// for different names only contend when they hash to the same shard.
pub struct LoggerRegistry {
    backend: Arc<dyn LogBackend>,
    loggers: NamedCache<Logger>,
}

impl LoggerRegistry {
    /// Create a registry, resolving `binding` first.
    ///
    /// A binding failure is returned here, before any logger exists.
    pub fn new(binding: &BackendBinding) -> Result<Self> {
        let backend = binding.ensure_initialized()?;
        Ok(Self {
            backend,
            loggers: NamedCache::new(),
        })
    }

    /// Logger for `name`, created and cached on first request.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        get_or_create(&self.loggers, name, || {
            tracing::trace!(target: TARGET, logger = name, "creating logger");
            Logger::new(name, Arc::clone(&self.backend))
        })
    }

    /// Drop every cached logger. Held loggers keep working.
    pub fn reset(&self) {
        self.loggers.clear();
    }

    /// Number of cached loggers.
    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    /// Returns true when no logger is cached.
    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    /// Returns true when a logger for `name` is cached.
    pub fn contains(&self, name: &str) -> bool {
        self.loggers.contains_key(name)
    }
}

impl LoggerFactory for LoggerRegistry {
    fn get_logger(&self, name: &str) -> Arc<Logger> {
        Self::get_logger(self, name)
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoggerRegistry")
            .field("loggers", &self.loggers.len())
            .finish_non_exhaustive()
    }
}
