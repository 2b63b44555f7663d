//! Config loading helpers (env + file + overrides).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{
    BackendKind, BridgeConfig, BridgeEnv, TracingFormat, ValidatedBridgeConfig,
    apply_env_overrides,
};
use logbridge_domain::LevelFilter;
use logbridge_shared::{ErrorCode, ErrorEnvelope};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk config format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

/// Load the bridge config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`BridgeEnv`)
/// - overrides JSON (partial config)
/// - config document (file content)
/// - defaults (`BridgeConfig::default()`)
pub fn load_bridge_config_from_sources(
    config: Option<(&str, ConfigFormat)>,
    overrides_json: Option<&str>,
    env: &BridgeEnv,
) -> Result<ValidatedBridgeConfig, ErrorEnvelope> {
    let mut base = match config {
        None => BridgeConfig::default(),
        Some((input, format)) => parse_config_unvalidated(input, format)?,
    };

    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        apply_overrides(&mut base, overrides);
    }

    // env is applied last and also validates/normalizes the resulting config.
    apply_env_overrides(base, env)
}

/// Load the bridge config from an optional file path.
pub fn load_bridge_config_from_path(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
    env: &BridgeEnv,
) -> Result<ValidatedBridgeConfig, ErrorEnvelope> {
    match config_path {
        None => load_bridge_config_from_sources(None, overrides_json, env),
        Some(path) => {
            let config_text = read_config_file(path)?;
            let format = detect_config_format(path)?;
            tracing::debug!(
                target: "logbridge::config",
                path = %path.display(),
                ?format,
                "loading config file"
            );
            load_bridge_config_from_sources(Some((&config_text, format)), overrides_json, env)
        },
    }
}

/// Load the bridge config from std env.
///
/// The file named by `config_path` wins over `LOGBRIDGE_CONFIG`.
pub fn load_bridge_config_std_env(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<ValidatedBridgeConfig, ErrorEnvelope> {
    let env = BridgeEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    let env_path = env.config_path.as_deref().map(Path::new);
    load_bridge_config_from_path(config_path.or(env_path), overrides_json, &env)
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<BridgeConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn parse_overrides_json(input: &str) -> Result<BridgeConfigOverrides, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid overrides JSON: {error}"),
        )
        .with_metadata("source", "overrides")
    })
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("toml") => Ok(ConfigFormat::Toml),
        None | Some("json") => Ok(ConfigFormat::Json),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .toml or .json",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct BridgeConfigOverrides {
    version: Option<u32>,
    backend: Option<BackendKind>,
    level: Option<LevelFilter>,
    loggers: BTreeMap<String, LevelFilter>,
    json: JsonConfigOverrides,
    tracing: TracingConfigOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct JsonConfigOverrides {
    include_context: Option<bool>,
    redact_secrets: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct TracingConfigOverrides {
    install_subscriber: Option<bool>,
    format: Option<TracingFormat>,
}

fn apply_overrides(config: &mut BridgeConfig, overrides: BridgeConfigOverrides) {
    if let Some(version) = overrides.version {
        config.version = version;
    }
    if let Some(backend) = overrides.backend {
        config.backend = backend;
    }
    if let Some(level) = overrides.level {
        config.level = level;
    }
    config.loggers.extend(overrides.loggers);

    if let Some(value) = overrides.json.include_context {
        config.json.include_context = value;
    }
    if let Some(value) = overrides.json.redact_secrets {
        config.json.redact_secrets = value;
    }
    if let Some(value) = overrides.tracing.install_subscriber {
        config.tracing.install_subscriber = value;
    }
    if let Some(format) = overrides.tracing.format {
        config.tracing.format = format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_precedence_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
        let config_toml = r#"
            version = 1
            level = "debug"
            backend = "tracing"
        "#;
        let overrides_json = r#"{ "level": "warn", "loggers": { "svc": "trace" } }"#;
        let env = BridgeEnv {
            level: Some(LevelFilter::Error),
            ..BridgeEnv::default()
        };

        let config = load_bridge_config_from_sources(
            Some((config_toml, ConfigFormat::Toml)),
            Some(overrides_json),
            &env,
        )?;
        assert_eq!(config.level, LevelFilter::Error);
        assert_eq!(config.backend, BackendKind::Tracing);
        assert_eq!(config.loggers.get("svc"), Some(&LevelFilter::Trace));
        Ok(())
    }

    #[test]
    fn overrides_apply_without_env() -> Result<(), Box<dyn std::error::Error>> {
        let config = load_bridge_config_from_sources(
            None,
            Some(r#"{ "json": { "redactSecrets": false } }"#),
            &BridgeEnv::default(),
        )?;
        assert!(!config.json.redact_secrets);
        assert!(config.json.include_context);
        Ok(())
    }

    #[test]
    fn env_levels_merge_over_file_loggers() -> Result<(), Box<dyn std::error::Error>> {
        let config_json = r#"{ "loggers": { "svc.db": "error", "svc.api": "info" } }"#;
        let mut levels = BTreeMap::new();
        levels.insert("svc.db".to_owned(), LevelFilter::Warn);
        let env = BridgeEnv {
            levels: Some(levels),
            ..BridgeEnv::default()
        };

        let config =
            load_bridge_config_from_sources(Some((config_json, ConfigFormat::Json)), None, &env)?;
        assert_eq!(config.loggers.get("svc.db"), Some(&LevelFilter::Warn));
        assert_eq!(config.loggers.get("svc.api"), Some(&LevelFilter::Info));
        Ok(())
    }

    #[test]
    fn invalid_overrides_report_source() {
        let error = load_bridge_config_from_sources(
            None,
            Some(r#"{ "colour": 1 }"#),
            &BridgeEnv::default(),
        )
        .err();
        assert_eq!(
            error
                .as_ref()
                .and_then(|error| error.metadata.get("source"))
                .map(String::as_str),
            Some("overrides")
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let error = detect_config_format(Path::new("bridge.yaml")).err();
        assert_eq!(
            error.map(|error| error.code),
            Some(ErrorCode::new("config", "unsupported_format"))
        );
        assert_eq!(
            detect_config_format(Path::new("bridge.TOML")).ok(),
            Some(ConfigFormat::Toml)
        );
    }

    #[test]
    fn missing_file_maps_to_not_found_code() {
        let error = load_bridge_config_from_path(
            Some(Path::new("/definitely/not/here/bridge.toml")),
            None,
            &BridgeEnv::default(),
        )
        .err();
        assert_eq!(
            error.map(|error| error.code),
            Some(ErrorCode::new("config", "config_file_not_found"))
        );
    }
}
