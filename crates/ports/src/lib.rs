//! # logbridge-ports
//!
//! Port traits for the logbridge hexagonal architecture.
//!
//! The dispatch engine depends only on these traits; concrete engines, marker
//! factories, and context adapters live in adapter crates. This crate depends
//! only on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod backend;
pub mod marker_factory;
pub mod mdc;

pub use backend::*;
pub use marker_factory::*;
pub use mdc::*;

// Re-export the domain types used in port signatures, so adapter crates can
// implement ports without naming `logbridge-domain` for every import.
pub use logbridge_domain::{Level, LevelFilter, LogEntry, LogRecord, LoggingEvent, Marker};

#[cfg(test)]
mod tests {
    use super::*;
    use logbridge_domain::domain_crate_version;
    use logbridge_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;
        let mut in_dev_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                in_dev_deps = line == "[dev-dependencies]";
                continue;
            }
            if !(in_deps || in_dev_deps) {
                continue;
            }
            if line.starts_with("logbridge-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn ports_depends_only_on_domain_and_shared() {
        let deps = workspace_deps();
        let allowed = ["logbridge-domain", "logbridge-shared"];

        for dep in &deps {
            assert!(
                allowed.contains(&dep.as_str()),
                "unexpected dependency found: {dep}"
            );
        }

        for expected in allowed {
            assert!(
                deps.iter().any(|dep| dep == expected),
                "missing dependency: {expected}"
            );
        }
    }

    #[test]
    fn ports_can_use_domain_and_shared() {
        assert!(!ports_crate_version().is_empty());
        assert!(!domain_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
