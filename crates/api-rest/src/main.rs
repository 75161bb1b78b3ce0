//! Sitemap Proxy server
//!
//! Serves the enriched route sitemap and the user/todo directory proxy.

use anyhow::{Context, Result};
use clap::Parser;
use sitemap_api_rest::{create_app, AppState};
use sitemap_common::{init_tracing, AppConfig};
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "sitemap-proxy")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml and {APP_ENV}.toml
    #[arg(short, long, env = "SITEMAP_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Host to bind to, overriding the configuration
    #[arg(long, env = "SITEMAP_HOST")]
    host: Option<String>,

    /// Port to listen on, overriding the configuration
    #[arg(short, long, env = "SITEMAP_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from(&args.config_dir)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    init_tracing(&config.telemetry)?;

    let address = config.server_address();
    info!(
        address = %address,
        routes_base_url = %config.upstream.routes_base_url,
        directory_base_url = %config.upstream.directory_base_url,
        max_concurrent_status_checks = ?config.enrichment.max_concurrent_status_checks,
        "Starting sitemap proxy"
    );

    let app = create_app(AppState::from_config(config)?);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Sitemap proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
