//! System I Gateway (v1)
//!
//! An API gateway built with Tokio and Axum that fronts the System I
//! mainframe backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────┐
//!                      │                 SYSTEM I GATEWAY               │
//!                      │                                                │
//!  JSON Request        │  ┌────────┐   ┌──────────┐   ┌─────────────┐  │
//!  ────────────────────┼─▶│  http  │──▶│   ops    │──▶│  dispatch   │  │
//!                      │  │ server │   │ encoder  │   │route + port │  │
//!                      │  └────────┘   └──────────┘   └──────┬──────┘  │
//!                      │                                     │         │
//!                      │                                     ▼         │
//!  JSON Response       │  ┌────────┐   ┌──────────┐   ┌─────────────┐  │     System I
//!  ◀───────────────────┼──│envelope│◀──│   ops    │◀──│  net tcp    │◀─┼──── (fixed-width
//!                      │  │  200   │   │ decoder  │   │  client     │  │      over TCP)
//!                      │  └────────┘   └──────────┘   └─────────────┘  │
//!                      │                                                │
//!                      │  ┌──────────────────────────────────────────┐ │
//!                      │  │          Cross-Cutting Concerns          │ │
//!                      │  │  ┌────────┐ ┌────────┐ ┌──────────────┐  │ │
//!                      │  │  │ config │ │ domain │ │ audit (ELK)  │  │ │
//!                      │  │  └────────┘ └────────┘ └──────────────┘  │ │
//!                      │  └──────────────────────────────────────────┘ │
//!                      └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use systemi_gateway::config::loader::load_config;
use systemi_gateway::{GatewayConfig, HttpServer};

#[derive(Parser, Debug)]
#[command(name = "systemi-gateway", about = "JSON/HTTP gateway to System I")]
struct Args {
    /// Path to the TOML configuration file. Defaults are used if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "systemi_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("systemi-gateway v0.1.0 starting");

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        destinations = config.destinations.len(),
        audit_dir = %config.audit.dir,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
