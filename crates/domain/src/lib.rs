//! # logbridge-domain
//!
//! Value types shared by every layer of the facade adapter.
//!
//! - **Levels** - `Level`, `LevelFilter`
//! - **Markers** - `Marker`
//! - **Records** - `LogRecord`, `LogArg`, `Throwable`
//! - **Events** - `LoggingEvent`, `KeyValuePair`, `LogEntry`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use logbridge_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod event;
pub mod level;
pub mod marker;
pub mod record;

pub use event::{KeyValuePair, LogEntry, LoggingEvent};
pub use level::{Level, LevelFilter, LevelParseError};
pub use marker::Marker;
pub use record::{LogArg, LogRecord, Throwable};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
