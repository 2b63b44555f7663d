//! # logbridge-engine
//!
//! The dispatch and lifecycle engine of the facade adapter.
//!
//! - **Binding** - `BackendBinding`, lazy and resolved exactly once
//! - **Loggers** - `Logger`, level gating and call normalization
//! - **Fluent events** - `LoggingEventBuilder`
//! - **Registry** - `LoggerRegistry`, one logger per name
//!
//! ## Dependency Rules
//!
//! - Depends only on `domain`, `ports`, and `shared`
//! - Never names a concrete backend

pub mod binding;
pub mod event_builder;
pub mod logger;
pub mod registry;

pub use binding::BackendBinding;
pub use event_builder::LoggingEventBuilder;
pub use logger::{Logger, UNKNOWN_CALLER};
pub use registry::{LoggerFactory, LoggerRegistry};

/// Returns the engine crate version.
#[must_use]
pub const fn engine_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                continue;
            }
            if in_deps && line.starts_with("logbridge-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn engine_depends_only_on_ports_domain_and_shared() {
        let deps = workspace_deps();
        let allowed = ["logbridge-domain", "logbridge-ports", "logbridge-shared"];

        for dep in &deps {
            assert!(
                allowed.contains(&dep.as_str()),
                "unexpected dependency found: {dep}"
            );
        }
    }

    #[test]
    fn engine_crate_compiles() {
        assert!(!engine_crate_version().is_empty());
    }
}
