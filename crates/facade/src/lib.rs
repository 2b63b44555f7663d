//! # logbridge-facade
//!
//! Entry points for applications.
//! This crate depends on `infra` and `engine`, and re-exports the types an
//! application needs to log.
//!
//! The process-wide provider is built on first access from `LOGBRIDGE_*`
//! variables (and the file named by `LOGBRIDGE_CONFIG`). If the backend
//! cannot be resolved, every entry point returns the same error.

mod macros;

use std::sync::{Arc, LazyLock};

pub use logbridge_adapters::{
    BasicMarkerFactory, BasicMdcAdapter, JsonBackend, LogSink, MemoryLogSink, StderrLogSink,
    TracingBackend,
};
pub use logbridge_config::{BackendKind, BridgeConfig, LevelRules, TracingFormat};
pub use logbridge_domain::{
    KeyValuePair, Level, LevelFilter, LogArg, LogEntry, LogRecord, LoggingEvent, Marker,
    Throwable,
};
pub use logbridge_engine::{
    BackendBinding, Logger, LoggerFactory, LoggerRegistry, LoggingEventBuilder,
};
pub use logbridge_infra::{
    BridgeServiceProvider, ConfigBackendResolver, REQUESTED_API_VERSION, build_log_backend,
};
pub use logbridge_ports::{BackendResolver, ContextMap, LogBackend, MarkerFactory, MdcAdapter};
pub use logbridge_shared::{ErrorCode, ErrorEnvelope, Result};

static PROVIDER: LazyLock<BridgeServiceProvider> = LazyLock::new(|| {
    let provider = BridgeServiceProvider::from_std_env();
    if let Err(error) = provider.initialize() {
        tracing::error!(
            target: "logbridge::facade",
            code = %error.code,
            message = %error.message,
            "logging backend unavailable"
        );
    }
    provider
});

/// The process-wide provider, initialized on first access.
pub fn service_provider() -> &'static BridgeServiceProvider {
    &PROVIDER
}

fn initialized_provider() -> Result<&'static BridgeServiceProvider> {
    let provider = service_provider();
    if provider.is_initialized() {
        return Ok(provider);
    }
    // The binding is sticky, so this reports the original resolution error.
    provider.initialize()?;
    Ok(provider)
}

/// The process-wide logger registry.
pub fn logger_factory() -> Result<Arc<LoggerRegistry>> {
    initialized_provider()?
        .get_logger_factory()
        .ok_or_else(uninitialized)
}

/// Logger for `name` from the process-wide registry.
pub fn get_logger(name: &str) -> Result<Arc<Logger>> {
    Ok(logger_factory()?.get_logger(name))
}

/// The process-wide marker factory.
pub fn marker_factory() -> Result<Arc<dyn MarkerFactory>> {
    initialized_provider()?
        .get_marker_factory()
        .ok_or_else(uninitialized)
}

/// The process-wide diagnostic context adapter.
pub fn mdc() -> Result<Arc<dyn MdcAdapter>> {
    initialized_provider()?
        .get_mdc_adapter()
        .ok_or_else(uninitialized)
}

fn uninitialized() -> ErrorEnvelope {
    ErrorEnvelope::invariant(ErrorCode::internal(), "service provider is not initialized")
}

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[doc(hidden)]
pub mod __private {
    use super::{LogArg, Marker, Throwable};
    use serde::Serialize;
    use std::sync::Arc;

    /// Serialize one macro argument.
    pub fn to_log_arg<T: Serialize + ?Sized>(value: &T) -> LogArg {
        serde_json::to_value(value)
            .unwrap_or_else(|error| LogArg::String(format!("<unserializable: {error}>")))
    }

    /// Share a macro `marker = …` value.
    pub fn marker_arg(marker: &Arc<Marker>) -> Arc<Marker> {
        Arc::clone(marker)
    }

    /// Wrap a macro `cause = …` value.
    pub fn cause_arg<E>(cause: E) -> Throwable
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Arc::new(cause)
    }
}
