//! Process-wide entry points configured from the environment.

use logbridge_facade::{REQUESTED_API_VERSION, get_logger, logger_factory, service_provider};
use std::error::Error;
use std::sync::Arc;

#[test]
fn global_provider_is_initialized_once() -> Result<(), Box<dyn Error>> {
    let provider = service_provider();
    assert!(provider.is_initialized());
    assert_eq!(provider.get_requested_api_version(), REQUESTED_API_VERSION);
    assert!(std::ptr::eq(provider, service_provider()));

    let first = get_logger("e2e.global")?;
    let second = logger_factory()?.get_logger("e2e.global");
    assert!(Arc::ptr_eq(&first, &second));
    Ok(())
}

#[test]
fn global_capabilities_are_shared() -> Result<(), Box<dyn Error>> {
    let markers = logbridge_facade::marker_factory()?;
    assert!(Arc::ptr_eq(
        &markers.get_marker("GLOBAL"),
        &logbridge_facade::marker_factory()?.get_marker("GLOBAL")
    ));

    let mdc = logbridge_facade::mdc()?;
    mdc.put("scope", "e2e");
    assert_eq!(logbridge_facade::mdc()?.get("scope").as_deref(), Some("e2e"));
    mdc.clear();
    Ok(())
}
