//! JSON backend end to end: provider, registry, logger, formatter, sink.

use logbridge_facade::{
    BridgeServiceProvider, ConfigBackendResolver, ErrorCode, LevelFilter, LogSink, Marker,
    MemoryLogSink,
};
use logbridge_config::{BridgeConfig, BridgeEnv};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::error::Error;
use std::io;
use std::sync::Arc;

fn provider_with(
    config: BridgeConfig,
    sink: Arc<dyn LogSink>,
) -> Result<BridgeServiceProvider, Box<dyn Error>> {
    let resolver = ConfigBackendResolver::from_config(config.validate_and_normalize()?).with_sink(sink);
    let provider = BridgeServiceProvider::with_resolver(resolver);
    provider.initialize()?;
    Ok(provider)
}

fn parse_lines(sink: &MemoryLogSink) -> Result<Vec<Value>, Box<dyn Error>> {
    sink.take()
        .iter()
        .map(|line| serde_json::from_str(line.trim()).map_err(Into::into))
        .collect()
}

#[test]
fn db_logger_emits_only_warn_and_above() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let mut config = BridgeConfig::default();
    config.loggers.insert("svc.db".to_owned(), LevelFilter::Warn);
    let provider = provider_with(config, sink.clone())?;

    let factory = provider.get_logger_factory().ok_or("missing factory")?;
    let logger = factory.get_logger("svc.db");

    assert!(!logger.is_info_enabled());
    assert!(logger.is_warn_enabled());
    logger.warn("retry #{}", vec![json!(3)])?;
    logger.debug("connecting", vec![])?;

    let lines = parse_lines(&sink)?;
    assert_eq!(lines.len(), 1);
    let line = lines.first().ok_or("missing line")?;
    assert_eq!(line["level"], json!("WARN"));
    assert_eq!(line["logger"], json!("svc.db"));
    assert_eq!(line["message"], json!("retry #3"));
    Ok(())
}

#[test]
fn context_markers_and_causes_reach_the_line() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let provider = provider_with(BridgeConfig::default(), sink.clone())?;
    let factory = provider.get_logger_factory().ok_or("missing factory")?;
    let markers = provider.get_marker_factory().ok_or("missing markers")?;
    let mdc = provider.get_mdc_adapter().ok_or("missing mdc")?;

    let audit: Arc<Marker> = markers.get_marker("AUDIT");
    audit.add(markers.get_marker("LOGIN"));
    mdc.put("requestId", "req-42");
    mdc.put("authToken", "s3cr3t");

    let logger = factory.get_logger("svc.auth");
    let outcome = logger
        .at_error()
        .add_marker(audit)
        .add_argument("bob")
        .add_key_value("attempt", 3)
        .set_cause(Arc::new(io::Error::other("bad password")))
        .log_message("login failed for {}");
    mdc.clear();
    outcome?;

    let lines = parse_lines(&sink)?;
    let line = lines.first().ok_or("missing line")?;
    assert_eq!(line["message"], json!("login failed for bob"));
    assert_eq!(line["markers"], json!(["AUDIT"]));
    assert_eq!(line["keyValues"]["attempt"], json!(3));
    assert_eq!(line["context"]["requestId"], json!("req-42"));
    assert_eq!(line["context"]["authToken"], json!("[REDACTED]"));
    assert_eq!(line["error"]["message"], json!("bad password"));
    Ok(())
}

struct ClosedSink;

impl LogSink for ClosedSink {
    fn write_line(&self, _line: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stderr closed"))
    }
}

#[test]
fn sink_failure_propagates_to_the_caller() -> Result<(), Box<dyn Error>> {
    let provider = provider_with(BridgeConfig::default(), Arc::new(ClosedSink))?;
    let logger = provider
        .get_logger_factory()
        .ok_or("missing factory")?
        .get_logger("svc");

    let error = logger.error("lost", vec![]).err().ok_or("expected failure")?;
    assert_eq!(error.code, ErrorCode::emit_failed());
    assert_eq!(error.metadata.get("logger").map(String::as_str), Some("svc"));

    // Disabled levels never touch the sink.
    logger.debug("skipped", vec![])?;
    Ok(())
}

#[test]
fn env_overrides_choose_levels() -> Result<(), Box<dyn Error>> {
    let mut vars = BTreeMap::new();
    vars.insert("LOGBRIDGE_LEVEL".to_owned(), "error".to_owned());
    vars.insert("LOGBRIDGE_LEVELS".to_owned(), "svc.api=debug".to_owned());
    let env = BridgeEnv::from_map(&vars)?;

    let sink = Arc::new(MemoryLogSink::new());
    let provider = BridgeServiceProvider::with_resolver(
        ConfigBackendResolver::from_env(env).with_sink(sink.clone()),
    );
    provider.initialize()?;
    let factory = provider.get_logger_factory().ok_or("missing factory")?;

    factory.get_logger("svc.api.users").debug("listing", vec![])?;
    factory.get_logger("svc.web").warn("slow", vec![])?;

    let lines = parse_lines(&sink)?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().map(|line| line["logger"].clone()), Some(json!("svc.api.users")));
    Ok(())
}
