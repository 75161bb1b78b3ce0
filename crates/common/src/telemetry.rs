//! Telemetry and observability setup.
//!
//! This module provides utilities for setting up structured logging using
//! `tracing` and `tracing-subscriber`.

use crate::config::TelemetryConfig;
use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Initialize tracing from the telemetry section of the configuration.
///
/// `RUST_LOG` takes precedence over the configured log level.
///
/// # Examples
///
/// ```no_run
/// use sitemap_common::{config::TelemetryConfig, telemetry::init_tracing};
///
/// init_tracing(&TelemetryConfig::default()).expect("Failed to initialize tracing");
/// ```
pub fn init_tracing(config: &TelemetryConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = Registry::default().with(env_filter);

    if config.json_logging {
        registry
            .with(json_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    } else {
        registry
            .with(pretty_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    }

    tracing::info!(service = %config.service_name, "Tracing initialized");

    Ok(())
}

/// Create a JSON logging layer
fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_level(true)
}

/// Create a pretty-formatted logging layer
fn pretty_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .pretty()
        .with_thread_ids(true)
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_reports_error() {
        let config = TelemetryConfig::default();
        // Only one subscriber can be installed per process, so the second
        // call must fail rather than panic.
        let first = init_tracing(&config);
        let second = init_tracing(&config);
        assert!(first.is_err() || second.is_err());
    }
}
