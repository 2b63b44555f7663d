//! Backends resolved from config fixtures on disk.

use logbridge_config::BridgeEnv;
use logbridge_facade::{BridgeServiceProvider, ConfigBackendResolver, ErrorCode, MemoryLogSink};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn empty_env() -> Result<BridgeEnv, Box<dyn Error>> {
    Ok(BridgeEnv::from_map(&BTreeMap::new())?)
}

#[test]
fn toml_fixture_drives_the_json_backend() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let resolver = ConfigBackendResolver::from_env(empty_env()?)
        .with_config_path(fixture_path("config/bridge-config.svc-db.toml"))
        .with_sink(sink.clone());
    let provider = BridgeServiceProvider::with_resolver(resolver);
    provider.initialize()?;

    let factory = provider.get_logger_factory().ok_or("missing factory")?;
    let db = factory.get_logger("svc.db.pool");
    db.info("pool ready", vec![])?;
    db.warn("pool exhausted", vec![])?;
    factory.get_logger("svc.api").info("listening", vec![])?;

    let lines = sink.take();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().any(|line| line.contains("pool exhausted")));
    assert!(lines.iter().any(|line| line.contains("listening")));
    Ok(())
}

#[test]
fn invalid_fixture_makes_the_provider_unusable() -> Result<(), Box<dyn Error>> {
    let resolver = ConfigBackendResolver::from_env(empty_env()?)
        .with_config_path(fixture_path("config/bridge-config.invalid.json"));
    let provider = BridgeServiceProvider::with_resolver(resolver);

    let error = provider.initialize().err().ok_or("expected failure")?;
    assert_eq!(error.code, ErrorCode::resolution_failed());
    assert_eq!(
        error.metadata.get("cause").map(String::as_str),
        Some("config:invalid_logger_prefix")
    );
    assert!(provider.get_logger_factory().is_none());

    let again = provider.initialize().err().map(|error| error.code);
    assert_eq!(again, Some(ErrorCode::resolution_failed()));
    Ok(())
}
