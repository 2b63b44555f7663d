//! Integration tests for parsing config fixtures from the workspace testkit.

use logbridge_config::{
    BackendKind, CURRENT_CONFIG_VERSION, TracingFormat, parse_bridge_config_json,
    parse_bridge_config_toml,
};
use logbridge_domain::{Level, LevelFilter};
use logbridge_shared::ErrorCode;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn read_fixture(relative: &str) -> Result<String, Box<dyn Error>> {
    let path = workspace_root()
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative);
    Ok(fs::read_to_string(path)?)
}

#[test]
fn parses_valid_fixture_and_normalizes() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/bridge-config.valid.json")?;
    let config = parse_bridge_config_json(&contents)?;

    assert_eq!(config.version, CURRENT_CONFIG_VERSION);
    assert_eq!(config.backend, BackendKind::Tracing);
    assert_eq!(config.level, LevelFilter::Debug);
    assert!(!config.json.include_context);
    assert!(config.json.redact_secrets, "unset fields keep defaults");
    assert_eq!(config.tracing.format, TracingFormat::Json);

    let prefixes: Vec<&str> = config.loggers.keys().map(String::as_str).collect();
    assert_eq!(prefixes, vec!["hyper", "svc.db", "svc.db.migrations"]);

    let rules = config.level_rules();
    assert!(rules.allows("svc.db.pool", Level::Warn));
    assert!(!rules.allows("svc.db.migrations.v2", Level::Error));
    assert!(rules.allows("svc.api", Level::Debug));

    Ok(())
}

#[test]
fn parses_default_toml_fixture() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/bridge-config.default.toml")?;
    let config = parse_bridge_config_toml(&contents)?;

    assert_eq!(config.into_inner(), logbridge_config::BridgeConfig::default());
    Ok(())
}

#[test]
fn invalid_fixture_reports_error_code() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/bridge-config.invalid.json")?;
    let error = parse_bridge_config_json(&contents)
        .err()
        .ok_or_else(|| std::io::Error::other("expected invalid fixture error"))?;

    assert_eq!(error.code, ErrorCode::new("config", "invalid_logger_prefix"));
    assert_eq!(
        error.metadata.get("field").map(String::as_str),
        Some("loggers")
    );

    Ok(())
}
