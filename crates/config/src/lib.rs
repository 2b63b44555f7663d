//! # logbridge-config
//!
//! Configuration schema, validation, and normalization for the bridge.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Level rules derived from configuration.
pub mod levels;
/// Config loading helpers (env + file + overrides).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use schema::{
    BackendKind, BridgeConfig, CURRENT_CONFIG_VERSION, ConfigSchemaError, JsonConfig,
    MAX_LOGGER_OVERRIDES, TracingConfig, TracingFormat, ValidatedBridgeConfig,
    parse_bridge_config_json, parse_bridge_config_toml,
};

pub use env::{BridgeEnv, EnvParseError, apply_env_overrides};
pub use levels::LevelRules;
pub use load::{
    ConfigFormat, load_bridge_config_from_path, load_bridge_config_from_sources,
    load_bridge_config_std_env,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
