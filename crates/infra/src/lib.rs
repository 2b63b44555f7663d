//! # logbridge-infra
//!
//! Composition root: backend selection from configuration, the service
//! provider, and `tracing` subscriber installation.
//! This crate depends on `engine`, `adapters`, `config`, `ports`, and `shared`.

/// Backend selection from configuration.
pub mod backend_factory;
/// `tracing` subscriber installation.
pub mod observability;
/// Service provider composition root.
pub mod provider;

pub use backend_factory::{ConfigBackendResolver, build_log_backend};
pub use observability::install_subscriber;
pub use provider::{BridgeServiceProvider, REQUESTED_API_VERSION};

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
