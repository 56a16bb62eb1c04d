//! Stance API Forwarding Proxy
//!
//! A transparent reverse proxy fronting the Stance backend API.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                STANCE PROXY                   │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ routing  │──▶│ forwarder │──┼──▶ Backend
//!                    │  │ server  │   │ (target  │   │  (hyper   │  │    Origin
//!                    │  └────┬────┘   │   URL)   │   │  client)  │  │
//!                    │       │        └──────────┘   └─────┬─────┘  │
//!                    │       │ OPTIONS / mock              │        │
//!                    │       ▼                             ▼        │
//!   Client Response  │  ┌─────────┐                  ┌───────────┐  │
//!   ◀────────────────┼──│ CORS /  │                  │ response  │◀─┼──── Backend
//!                    │  │  mock   │                  │  mirror   │  │     Response
//!                    │  └─────────┘                  └───────────┘  │
//!                    │                                               │
//!                    │  config · observability · lifecycle           │
//!                    └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use crate::config::loader::load_config;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};

#[derive(Parser)]
#[command(name = "stance-proxy")]
#[command(about = "Forwarding proxy for the Stance API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Environment variables
    /// (BACKEND_ORIGIN, BACKEND_PREFIX, MOCK_PROXY) override file values.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        prefix = %config.upstream.prefix,
        mock = config.mock.enabled,
        "configuration loaded"
    );
    if config.upstream.origin.is_none() {
        tracing::warn!("BACKEND_ORIGIN not set; forwarded requests will fail with 500");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
