//! Gateway binary: prerender interception in front of an origin.
//!
//! ```text
//! crawler ──▶ prerender-proxy ──▶ rendering service
//! human   ──▶ prerender-proxy ──▶ origin application
//! ```
//!
//! Configuration comes from a TOML file (see `config.example.toml`) plus the
//! `PRERENDER_SERVICE_URL` / `PRERENDER_TOKEN` environment variables; with no
//! file every option falls back to its default.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prerender_proxy::config::{load_config, GatewayConfig};
use prerender_proxy::gateway;
use prerender_proxy::observability::metrics;

#[derive(Parser)]
#[command(name = "prerender-proxy")]
#[command(about = "Serves prerendered snapshots to crawlers, proxies everyone else", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.listener.bind_address = listen;
    }

    // Initialize tracing subscriber; RUST_LOG wins over the config file.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.observability.log_level)
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("prerender-proxy v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin = %config.origin.url,
        service_url = config.render.service_url.as_deref().unwrap_or("(from environment)"),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    gateway::run(config, listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
