//! Service provider: the composition root handed to the host facade.

use crate::backend_factory::ConfigBackendResolver;
use logbridge_adapters::{BasicMarkerFactory, BasicMdcAdapter};
use logbridge_engine::{BackendBinding, LoggerRegistry};
use logbridge_ports::{BackendResolver, MarkerFactory, MdcAdapter};
use logbridge_shared::{ErrorCode, ErrorEnvelope, Result};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Facade API version this provider implements.
pub const REQUESTED_API_VERSION: &str = "2.0.99";

const TARGET: &str = "logbridge::provider";

struct ProviderBundle {
    registry: Arc<LoggerRegistry>,
    marker_factory: Arc<BasicMarkerFactory>,
    mdc_adapter: Arc<BasicMdcAdapter>,
}

/// Wires the logger registry, marker factory, and diagnostic context adapter.
///
/// Accessors return `None` until [`initialize`](Self::initialize) succeeds.
pub struct BridgeServiceProvider {
    binding: BackendBinding,
    bundle: OnceLock<ProviderBundle>,
}

impl BridgeServiceProvider {
    /// Create an uninitialized provider over `binding`.
    pub const fn new(binding: BackendBinding) -> Self {
        Self {
            binding,
            bundle: OnceLock::new(),
        }
    }

    /// Create an uninitialized provider resolving through `resolver`.
    pub fn with_resolver(resolver: impl BackendResolver + 'static) -> Self {
        Self::new(BackendBinding::new(resolver))
    }

    /// Create an uninitialized provider configured from `LOGBRIDGE_*` variables.
    pub fn from_std_env() -> Self {
        Self::with_resolver(ConfigBackendResolver::from_std_env())
    }

    /// Build the registry and capability objects.
    ///
    /// Resolves the backend. Fails with the binding error when resolution
    /// fails, and with `provider:already_initialized` on a second call.
    pub fn initialize(&self) -> Result<()> {
        if self.bundle.get().is_some() {
            return Err(already_initialized());
        }
        let registry = LoggerRegistry::new(&self.binding).inspect_err(|error| {
            tracing::error!(target: TARGET, code = %error.code, "provider initialization failed");
        })?;
        let bundle = ProviderBundle {
            registry: Arc::new(registry),
            marker_factory: Arc::new(BasicMarkerFactory::new()),
            mdc_adapter: Arc::new(BasicMdcAdapter::new()),
        };
        self.bundle.set(bundle).map_err(|_| already_initialized())?;
        tracing::debug!(
            target: TARGET,
            api_version = REQUESTED_API_VERSION,
            "provider initialized"
        );
        Ok(())
    }

    /// Returns true once `initialize` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.bundle.get().is_some()
    }

    /// The logger registry.
    pub fn get_logger_factory(&self) -> Option<Arc<LoggerRegistry>> {
        self.bundle
            .get()
            .map(|bundle| Arc::clone(&bundle.registry))
    }

    /// The marker factory.
    pub fn get_marker_factory(&self) -> Option<Arc<dyn MarkerFactory>> {
        self.bundle.get().map(|bundle| {
            let factory: Arc<dyn MarkerFactory> = bundle.marker_factory.clone();
            factory
        })
    }

    /// The diagnostic context adapter.
    pub fn get_mdc_adapter(&self) -> Option<Arc<dyn MdcAdapter>> {
        self.bundle.get().map(|bundle| {
            let adapter: Arc<dyn MdcAdapter> = bundle.mdc_adapter.clone();
            adapter
        })
    }

    /// Facade API version implemented by this provider.
    pub const fn get_requested_api_version(&self) -> &'static str {
        REQUESTED_API_VERSION
    }
}

impl fmt::Debug for BridgeServiceProvider {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BridgeServiceProvider")
            .field("binding", &self.binding)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

fn already_initialized() -> ErrorEnvelope {
    ErrorEnvelope::invariant(
        ErrorCode::already_initialized(),
        "service provider is already initialized",
    )
}
