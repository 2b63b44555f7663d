//! Backend selection from configuration.

use logbridge_adapters::{BasicMdcAdapter, JsonBackend, LogSink, StderrLogSink, TracingBackend};
use logbridge_config::{
    BackendKind, BridgeEnv, ValidatedBridgeConfig, load_bridge_config_from_path,
    load_bridge_config_std_env,
};
use logbridge_ports::{BackendResolver, LogBackend};
use logbridge_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const TARGET: &str = "logbridge::infra";

/// Build the backend named by `config`, writing JSON lines to `sink`.
///
/// Installs a `tracing` subscriber first when the tracing backend asks for one.
pub fn build_log_backend(
    config: &ValidatedBridgeConfig,
    sink: Arc<dyn LogSink>,
) -> Arc<dyn LogBackend> {
    let rules = config.level_rules();
    tracing::debug!(
        target: TARGET,
        backend = %config.backend,
        level = config.level.as_str(),
        overrides = rules.override_count(),
        "building log backend"
    );
    match config.backend {
        BackendKind::Json => {
            let mut backend =
                JsonBackend::new(sink, rules).with_redaction(config.json.redact_secrets);
            if config.json.include_context {
                backend = backend.with_context(Arc::new(BasicMdcAdapter::new()));
            }
            Arc::new(backend)
        },
        BackendKind::Tracing => {
            if config.tracing.install_subscriber {
                crate::observability::install_subscriber(config.tracing.format, &rules);
            }
            Arc::new(TracingBackend::new(rules))
        },
    }
}

enum ConfigSource {
    StdEnv,
    Env(BridgeEnv),
    Loaded(ValidatedBridgeConfig),
}

/// Resolves the backend from configuration when the binding first needs it.
///
/// Any loading failure is reported as `binding:resolution_failed`, with the
/// underlying code in the `cause` metadata entry.
pub struct ConfigBackendResolver {
    source: ConfigSource,
    config_path: Option<PathBuf>,
    overrides_json: Option<String>,
    sink: Arc<dyn LogSink>,
}

impl ConfigBackendResolver {
    /// Read `LOGBRIDGE_*` variables from the process environment at resolution time.
    pub fn from_std_env() -> Self {
        Self::with_source(ConfigSource::StdEnv)
    }

    /// Use an already parsed environment.
    pub fn from_env(env: BridgeEnv) -> Self {
        Self::with_source(ConfigSource::Env(env))
    }

    /// Use an already validated config.
    pub fn from_config(config: ValidatedBridgeConfig) -> Self {
        Self::with_source(ConfigSource::Loaded(config))
    }

    fn with_source(source: ConfigSource) -> Self {
        Self {
            source,
            config_path: None,
            overrides_json: None,
            sink: Arc::new(StderrLogSink),
        }
    }

    /// Read this config file instead of `LOGBRIDGE_CONFIG`.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Apply a partial JSON config over the file.
    #[must_use]
    pub fn with_overrides_json(mut self, overrides_json: impl Into<String>) -> Self {
        self.overrides_json = Some(overrides_json.into());
        self
    }

    /// Write JSON lines to `sink` instead of stderr.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    fn load_from_env(&self, env: &BridgeEnv) -> Result<ValidatedBridgeConfig> {
        let env_path = env.config_path.as_deref().map(Path::new);
        let path = self.config_path.as_deref().or(env_path);
        load_bridge_config_from_path(path, self.overrides_json.as_deref(), env)
    }

    fn build(&self) -> Result<Arc<dyn LogBackend>> {
        match &self.source {
            ConfigSource::Loaded(config) => Ok(build_log_backend(config, Arc::clone(&self.sink))),
            ConfigSource::Env(env) => {
                let config = self.load_from_env(env)?;
                Ok(build_log_backend(&config, Arc::clone(&self.sink)))
            },
            ConfigSource::StdEnv => {
                let config = load_bridge_config_std_env(
                    self.config_path.as_deref(),
                    self.overrides_json.as_deref(),
                )?;
                Ok(build_log_backend(&config, Arc::clone(&self.sink)))
            },
        }
    }
}

impl BackendResolver for ConfigBackendResolver {
    fn resolve(&self) -> Result<Arc<dyn LogBackend>> {
        self.build().map_err(into_resolution_error)
    }
}

impl fmt::Debug for ConfigBackendResolver {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            ConfigSource::StdEnv => "std-env",
            ConfigSource::Env(_) => "env",
            ConfigSource::Loaded(_) => "config",
        };
        formatter
            .debug_struct("ConfigBackendResolver")
            .field("source", &source)
            .field("config_path", &self.config_path)
            .finish_non_exhaustive()
    }
}

fn into_resolution_error(error: ErrorEnvelope) -> ErrorEnvelope {
    let mut wrapped = ErrorEnvelope::unexpected(
        ErrorCode::resolution_failed(),
        format!("backend configuration failed: {}", error.message),
        ErrorClass::NonRetriable,
    )
    .with_metadata("cause", error.code.to_string());
    wrapped.metadata.extend(error.metadata);
    wrapped
}
