//! Environment variable parsing and env-to-config merging.
//!
//! This module keeps env parsing:
//! - strict (invalid values fail fast)
//! - deterministic (`LOGBRIDGE_LEVELS` entries land in a sorted map)
//! - safe (secret-looking values are redacted in error metadata)

use crate::schema::{
    BackendKind, BridgeConfig, MAX_LOGGER_OVERRIDES, TracingFormat, ValidatedBridgeConfig,
};
use logbridge_domain::LevelFilter;
use logbridge_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: backend selection (`json` or `tracing`).
pub const ENV_BACKEND: &str = "LOGBRIDGE_BACKEND";
/// Env var: root level.
pub const ENV_LEVEL: &str = "LOGBRIDGE_LEVEL";
/// Env var: per-prefix levels as CSV `prefix=level` entries.
pub const ENV_LEVELS: &str = "LOGBRIDGE_LEVELS";
/// Env var: attach the diagnostic context to JSON lines.
pub const ENV_JSON_INCLUDE_CONTEXT: &str = "LOGBRIDGE_JSON_INCLUDE_CONTEXT";
/// Env var: redact secret-looking keys in JSON lines.
pub const ENV_JSON_REDACT_SECRETS: &str = "LOGBRIDGE_JSON_REDACT_SECRETS";
/// Env var: install a tracing subscriber.
pub const ENV_TRACING_INSTALL_SUBSCRIBER: &str = "LOGBRIDGE_TRACING_INSTALL_SUBSCRIBER";
/// Env var: installed subscriber format (`text` or `json`).
pub const ENV_TRACING_FORMAT: &str = "LOGBRIDGE_TRACING_FORMAT";
/// Env var: optional config file path (`.toml` or `.json`).
pub const ENV_CONFIG_PATH: &str = "LOGBRIDGE_CONFIG";

const ALL_ENV_VARS: [&str; 8] = [
    ENV_BACKEND,
    ENV_LEVEL,
    ENV_LEVELS,
    ENV_JSON_INCLUDE_CONTEXT,
    ENV_JSON_REDACT_SECRETS,
    ENV_TRACING_INSTALL_SUBSCRIBER,
    ENV_TRACING_FORMAT,
    ENV_CONFIG_PATH,
];

/// Parsed environment overrides. `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeEnv {
    /// Override for `backend`.
    pub backend: Option<BackendKind>,
    /// Override for `level`.
    pub level: Option<LevelFilter>,
    /// Entries merged into `loggers`.
    pub levels: Option<BTreeMap<String, LevelFilter>>,
    /// Override for `json.includeContext`.
    pub json_include_context: Option<bool>,
    /// Override for `json.redactSecrets`.
    pub json_redact_secrets: Option<bool>,
    /// Override for `tracing.installSubscriber`.
    pub tracing_install_subscriber: Option<bool>,
    /// Override for `tracing.format`.
    pub tracing_format: Option<TracingFormat>,
    /// Config file named by the environment.
    pub config_path: Option<Box<str>>,
}

impl BridgeEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            backend: parse_optional_enum(map, ENV_BACKEND, BackendKind::parse)?,
            level: parse_optional_enum(map, ENV_LEVEL, |raw| raw.parse::<LevelFilter>().ok())?,
            levels: parse_optional_levels(map, ENV_LEVELS)?,
            json_include_context: parse_optional_bool(map, ENV_JSON_INCLUDE_CONTEXT)?,
            json_redact_secrets: parse_optional_bool(map, ENV_JSON_REDACT_SECRETS)?,
            tracing_install_subscriber: parse_optional_bool(map, ENV_TRACING_INSTALL_SUBSCRIBER)?,
            tracing_format: parse_optional_enum(map, ENV_TRACING_FORMAT, TracingFormat::parse)?,
            config_path: parse_optional_trimmed_string(map, ENV_CONFIG_PATH)?,
        })
    }

    /// Parse env overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_ENV_VARS {
            if let Some(value) = std::env::var_os(name) {
                map.insert(name.to_owned(), value.to_string_lossy().into_owned());
            }
        }
        Self::from_map(&map)
    }
}

/// Apply env overrides to a base config, then validate and normalize it.
pub fn apply_env_overrides(
    base: BridgeConfig,
    env: &BridgeEnv,
) -> Result<ValidatedBridgeConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(backend) = env.backend {
        config.backend = backend;
    }
    if let Some(level) = env.level {
        config.level = level;
    }
    if let Some(levels) = &env.levels {
        for (prefix, filter) in levels {
            config.loggers.insert(prefix.clone(), *filter);
        }
    }
    if let Some(value) = env.json_include_context {
        config.json.include_context = value;
    }
    if let Some(value) = env.json_redact_secrets {
        config.json.redact_secrets = value;
    }
    if let Some(value) = env.tracing_install_subscriber {
        config.tracing.install_subscriber = value;
    }
    if let Some(format) = env.tracing_format {
        config.tracing.format = format;
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Typed env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// A boolean env var had an unrecognized value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
    /// An enum env var had an unsupported value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
    /// A CSV entry was not `prefix=level`.
    InvalidLevelEntry {
        /// Env var name.
        var: &'static str,
        /// Offending entry.
        entry: String,
    },
    /// A CSV env var had too many entries.
    CsvTooLarge {
        /// Env var name.
        var: &'static str,
        /// Number of entries.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
            Self::InvalidLevelEntry { .. } | Self::CsvTooLarge { .. } => {
                ErrorCode::new("config", "invalid_env_csv")
            },
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
            Self::InvalidLevelEntry { var, entry } => {
                write!(
                    formatter,
                    "{var} entry `{entry}` must look like prefix=level"
                )
            },
            Self::CsvTooLarge { var, len, max } => {
                write!(formatter, "{var} is too large ({len} items, max {max})")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => {
                envelope = envelope.with_metadata("env_var", var);
            },
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope = envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", redact_if_secret(var, &value));
            },
            EnvParseError::InvalidLevelEntry { var, entry } => {
                envelope = envelope
                    .with_metadata("env_var", var)
                    .with_metadata("entry", redact_if_secret(var, &entry));
            },
            EnvParseError::CsvTooLarge { var, len, max } => {
                envelope = envelope
                    .with_metadata("env_var", var)
                    .with_metadata("len", len.to_string())
                    .with_metadata("max", max.to_string());
            },
        }

        envelope
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_enum<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    parse(trimmed)
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidEnum {
            var,
            value: raw.clone(),
        })
}

fn parse_optional_levels(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<BTreeMap<String, LevelFilter>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();
    if entries.len() > MAX_LOGGER_OVERRIDES {
        return Err(EnvParseError::CsvTooLarge {
            var,
            len: entries.len(),
            max: MAX_LOGGER_OVERRIDES,
        });
    }

    let mut levels = BTreeMap::new();
    for entry in entries {
        let invalid = || EnvParseError::InvalidLevelEntry {
            var,
            entry: entry.to_owned(),
        };
        let (prefix, level) = entry.split_once('=').ok_or_else(invalid)?;
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(invalid());
        }
        let filter = level.parse::<LevelFilter>().map_err(|_| invalid())?;
        levels.insert(prefix.to_owned(), filter);
    }

    Ok(Some(levels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn missing_vars_default_to_none() -> Result<(), Box<dyn Error>> {
        let env = BridgeEnv::from_map(&BTreeMap::new())?;
        assert_eq!(env, BridgeEnv::default());
        Ok(())
    }

    #[test]
    fn levels_csv_is_parsed_into_sorted_map() -> Result<(), Box<dyn Error>> {
        let mut map = BTreeMap::new();
        map.insert(
            ENV_LEVELS.to_string(),
            " svc.db=warn, hyper = off ,,svc=DEBUG".to_string(),
        );
        let env = BridgeEnv::from_map(&map)?;

        let levels = env
            .levels
            .ok_or_else(|| std::io::Error::other("missing levels"))?;
        let entries: Vec<(&str, LevelFilter)> = levels
            .iter()
            .map(|(prefix, filter)| (prefix.as_str(), *filter))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("hyper", LevelFilter::Off),
                ("svc", LevelFilter::Debug),
                ("svc.db", LevelFilter::Warn),
            ]
        );
        Ok(())
    }

    #[test]
    fn malformed_level_entries_fail_fast() {
        let mut map = BTreeMap::new();
        map.insert(ENV_LEVELS.to_string(), "svc.db".to_string());
        assert!(matches!(
            BridgeEnv::from_map(&map),
            Err(EnvParseError::InvalidLevelEntry { .. })
        ));

        map.insert(ENV_LEVELS.to_string(), "svc.db=loud".to_string());
        assert!(matches!(
            BridgeEnv::from_map(&map),
            Err(EnvParseError::InvalidLevelEntry { .. })
        ));
    }

    #[test]
    fn empty_values_are_rejected() -> Result<(), Box<dyn Error>> {
        let mut map = BTreeMap::new();
        map.insert(ENV_BACKEND.to_string(), "   ".to_string());

        let envelope: ErrorEnvelope = BridgeEnv::from_map(&map)
            .err()
            .ok_or_else(|| std::io::Error::other("expected empty error"))?
            .into();

        assert_eq!(envelope.code, ErrorCode::new("config", "empty_env_var"));
        assert_eq!(
            envelope.metadata.get("env_var").map(String::as_str),
            Some(ENV_BACKEND)
        );
        assert!(!envelope.metadata.contains_key("value"));
        Ok(())
    }

    #[test]
    fn invalid_enum_echoes_non_secret_value() -> Result<(), Box<dyn Error>> {
        let mut map = BTreeMap::new();
        map.insert(ENV_BACKEND.to_string(), "syslog".to_string());

        let envelope: ErrorEnvelope = BridgeEnv::from_map(&map)
            .err()
            .ok_or_else(|| std::io::Error::other("expected enum error"))?
            .into();
        assert_eq!(envelope.code, ErrorCode::new("config", "invalid_env_enum"));
        assert_eq!(
            envelope.metadata.get("value").map(String::as_str),
            Some("syslog")
        );
        Ok(())
    }

    #[test]
    fn secret_looking_vars_are_redacted() {
        assert_eq!(redact_if_secret("LOGBRIDGE_TOKEN", "abc"), logbridge_shared::REDACTED);
        assert_eq!(redact_if_secret(ENV_BACKEND, "abc"), "abc");
    }
}
