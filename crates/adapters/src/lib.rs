//! # logbridge-adapters
//!
//! Reference implementations of the logbridge ports: two backends, a marker
//! factory, and a diagnostic context adapter, plus the message formatter they
//! share. This crate depends on `ports`, `domain`, `config`, and `shared`.

pub mod format;
pub mod json_backend;
pub mod log_sink;
pub mod marker_factory;
pub mod mdc;
pub mod tracing_backend;

pub use format::{format_message, render_argument, render_cause_chain};
pub use json_backend::JsonBackend;
pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink};
pub use marker_factory::BasicMarkerFactory;
pub use mdc::BasicMdcAdapter;
pub use tracing_backend::{BRIDGE_TARGET, TracingBackend};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
