//! Process-wide `tracing` subscriber installation.

use logbridge_adapters::BRIDGE_TARGET;
use logbridge_config::{LevelRules, TracingFormat};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Install a stderr `fmt` subscriber if none is installed yet.
///
/// Targets other than the bridge follow `RUST_LOG`, falling back to the root
/// level of `rules`. Bridge events are already gated per logger by the
/// backend, so the bridge target is opened to the most verbose level any rule
/// allows. Returns true when this call installed the subscriber; later calls
/// are no-ops returning false.
pub fn install_subscriber(format: TracingFormat, rules: &LevelRules) -> bool {
    let base = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(rules.root().as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(bridge_filter(base, rules))
        .with_writer(std::io::stderr);

    let installed = match format {
        TracingFormat::Text => builder.try_init(),
        TracingFormat::Json => builder.json().try_init(),
    }
    .is_ok();

    if installed {
        tracing::debug!(
            target: "logbridge::observability",
            format = %format,
            level = rules.root().as_str(),
            bridge_level = rules.most_verbose().as_str(),
            "tracing subscriber installed"
        );
    }
    installed
}

fn bridge_filter(base: EnvFilter, rules: &LevelRules) -> EnvFilter {
    let directive = format!("{BRIDGE_TARGET}={}", rules.most_verbose().as_str());
    match directive.parse::<Directive>() {
        Ok(directive) => base.add_directive(directive),
        Err(error) => {
            tracing::warn!(
                target: "logbridge::observability",
                %directive,
                %error,
                "bridge filter directive rejected"
            );
            base
        },
    }
}
