//! Tracing setup for the command-line client
//!
//! Human-readable console output by default, JSON lines with `--log-json`.
//! `RUST_LOG` takes precedence over the configured filter.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_telemetry(fallback_filter: &str, json: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));

    // Logs go to stderr so command output on stdout stays pipeable
    let (json_layer, console_layer) = if json {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_target(true);
        (Some(layer), None)
    } else {
        let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(console_layer)
        .try_init()?;

    tracing::debug!(filter = fallback_filter, json, "telemetry initialized");
    Ok(())
}
