//! Bridge configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (TOML or JSON).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Logger prefixes are trimmed and kept in a `BTreeMap` for stable ordering.

use crate::levels::LevelRules;
use logbridge_domain::LevelFilter;
use logbridge_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Maximum number of per-logger level overrides.
pub const MAX_LOGGER_OVERRIDES: usize = 1024;

/// Top-level bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct BridgeConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Backend that receives every emission.
    pub backend: BackendKind,
    /// Root level applied to loggers without an override.
    pub level: LevelFilter,
    /// Per-name-prefix level overrides. The longest matching prefix wins.
    pub loggers: BTreeMap<String, LevelFilter>,
    /// JSON backend settings.
    pub json: JsonConfig,
    /// Tracing backend settings.
    pub tracing: TracingConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            backend: BackendKind::default(),
            level: LevelFilter::Info,
            loggers: BTreeMap::new(),
            json: JsonConfig::default(),
            tracing: TracingConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedBridgeConfig, ConfigSchemaError> {
        self.validate_version()?;
        self.loggers = normalize_logger_overrides(std::mem::take(&mut self.loggers))?;
        Ok(ValidatedBridgeConfig { raw: self })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }
}

/// Validated config wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBridgeConfig {
    raw: BridgeConfig,
}

impl ValidatedBridgeConfig {
    /// Level rules derived from the root level and logger overrides.
    #[must_use]
    pub fn level_rules(&self) -> LevelRules {
        LevelRules::new(
            self.raw.level,
            self.raw
                .loggers
                .iter()
                .map(|(prefix, filter)| (prefix.clone(), *filter)),
        )
    }

    /// Access the validated config.
    #[must_use]
    pub const fn as_ref(&self) -> &BridgeConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> BridgeConfig {
        self.raw
    }
}

impl AsRef<BridgeConfig> for ValidatedBridgeConfig {
    fn as_ref(&self) -> &BridgeConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedBridgeConfig {
    type Target = BridgeConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// JSON lines written to a sink (stderr by default).
    #[default]
    Json,
    /// Events forwarded to the `tracing` dispatcher.
    Tracing,
}

impl BackendKind {
    /// Returns the canonical string identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Tracing => "tracing",
        }
    }

    /// Parse a case-insensitive identifier.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "tracing" => Some(Self::Tracing),
            _ => None,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// JSON backend settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct JsonConfig {
    /// Attach the diagnostic context map to each line.
    pub include_context: bool,
    /// Redact secret-looking keys in context and key/value pairs.
    pub redact_secrets: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            include_context: true,
            redact_secrets: true,
        }
    }
}

/// Tracing backend settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct TracingConfig {
    /// Install a `tracing-subscriber` fmt subscriber when the backend is built.
    pub install_subscriber: bool,
    /// Output format of the installed subscriber.
    pub format: TracingFormat,
}

/// Output format for the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl TracingFormat {
    /// Returns the canonical string identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Parse a case-insensitive identifier.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for TracingFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Parse a bridge config from a JSON string, applying validation and normalization.
pub fn parse_bridge_config_json(input: &str) -> Result<ValidatedBridgeConfig, ErrorEnvelope> {
    let config: BridgeConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a bridge config from a TOML string, applying validation and normalization.
pub fn parse_bridge_config_toml(input: &str) -> Result<ValidatedBridgeConfig, ErrorEnvelope> {
    let config: BridgeConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this build.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A logger prefix is empty, contains whitespace, or collides after trimming.
    InvalidLoggerPrefix {
        /// Offending prefix, as written.
        prefix: String,
        /// Human readable reason.
        reason: &'static str,
    },
    /// Too many logger overrides.
    TooManyLoggerOverrides {
        /// Number of overrides provided.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::InvalidLoggerPrefix { .. } => ErrorCode::new("config", "invalid_logger_prefix"),
            Self::TooManyLoggerOverrides { .. } => ErrorCode::new("config", "list_too_large"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => {
                write!(
                    formatter,
                    "unsupported config version: {found} (supported: {supported})"
                )
            },
            Self::InvalidLoggerPrefix { prefix, reason } => {
                write!(formatter, "invalid logger prefix `{prefix}`: {reason}")
            },
            Self::TooManyLoggerOverrides { len, max } => write!(
                formatter,
                "loggers must have at most {max} entries (got {len})"
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => {
                envelope = envelope
                    .with_metadata("found", found.to_string())
                    .with_metadata("supported", supported.to_string());
            },
            ConfigSchemaError::InvalidLoggerPrefix { prefix, reason } => {
                envelope = envelope
                    .with_metadata("field", "loggers")
                    .with_metadata("prefix", prefix)
                    .with_metadata("reason", reason);
            },
            ConfigSchemaError::TooManyLoggerOverrides { len, max } => {
                envelope = envelope
                    .with_metadata("field", "loggers")
                    .with_metadata("len", len.to_string())
                    .with_metadata("max", max.to_string());
            },
        }

        envelope
    }
}

fn normalize_logger_overrides(
    input: BTreeMap<String, LevelFilter>,
) -> Result<BTreeMap<String, LevelFilter>, ConfigSchemaError> {
    if input.len() > MAX_LOGGER_OVERRIDES {
        return Err(ConfigSchemaError::TooManyLoggerOverrides {
            len: input.len(),
            max: MAX_LOGGER_OVERRIDES,
        });
    }

    let mut output = BTreeMap::new();
    for (prefix, filter) in input {
        let trimmed = prefix.trim();
        if trimmed.is_empty() {
            return Err(ConfigSchemaError::InvalidLoggerPrefix {
                prefix,
                reason: "must be non-empty",
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ConfigSchemaError::InvalidLoggerPrefix {
                prefix,
                reason: "must not contain whitespace",
            });
        }
        if output.insert(trimmed.to_owned(), filter).is_some() {
            return Err(ConfigSchemaError::InvalidLoggerPrefix {
                prefix,
                reason: "duplicate after trimming",
            });
        }
    }

    Ok(output)
}
