//! Travel planner API proxy.
//!
//! Thin server-side routes for the travel planning app.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 TRAVEL PROXY                 │
//!   Client Request     │  ┌────────┐   ┌──────────────────────────┐   │
//!   ───────────────────┼─▶│  http  │──▶│ /flight-tracker ─────────┼───┼──▶ Flight API
//!                      │  │ server │   │ /map, /reminders (fixtures)   │
//!                      │  └────────┘   │ /download ──▶ Archiver ──┼───┼──▶ tar / build
//!                      │               └──────────────────────────┘   │
//!                      │  ┌────────┐   ┌──────────────────────────┐   │
//!   ───────────────────┼─▶│ places │──▶│ /places ─────────────────┼───┼──▶ Places API
//!                      │  └────────┘   └──────────────────────────┘   │
//!                      │                                              │
//!                      │  config · observability · lifecycle          │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use travel_proxy::config::load_config;
use travel_proxy::lifecycle::{signals, startup, Shutdown};
use travel_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "travel-proxy")]
#[command(about = "API proxy for the travel planner app", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "TRAVEL_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref(), |key| std::env::var(key).ok())?;
    logging::init_logging(&config.observability);

    tracing::info!("travel-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        flights_configured = config.flights.api_key.is_some(),
        places_enabled = config.places.enabled,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    signals::trigger_on_signal(&shutdown);

    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
