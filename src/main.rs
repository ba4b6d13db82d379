//! Todo gateway (v1)
//!
//! Exposes the todo RPC service as a JSON REST API.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │                 TODO GATEWAY                 │
//!     Client Request       │  ┌────────┐    ┌─────────┐    ┌───────────┐  │
//!     ─────────────────────┼─▶│  http  │───▶│ routing │───▶│ translate │  │
//!                          │  │ server │    │  table  │    │  request  │  │
//!                          │  └────────┘    └─────────┘    └─────┬─────┘  │
//!                          │                                     ▼        │
//!     Client Response      │  ┌────────┐                  ┌───────────┐   │
//!     ◀────────────────────┼──│response│◀─────────────────│  backend  │◀──┼──── Todo
//!                          │  └────────┘    (deadline)    │  service  │   │     Service
//!                          │                              └───────────┘   │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use todo_gateway::config::{self, GatewayConfig};
use todo_gateway::lifecycle::{signals, Shutdown};
use todo_gateway::observability::{logging, metrics};
use todo_gateway::{backend, HttpServer};

#[derive(Parser)]
#[command(name = "todo-gateway")]
#[command(about = "REST gateway for the todo RPC service", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "TODO_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;

    tracing::info!("todo-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = ?config.backend.kind,
        ctx_timeout_secs = config.timeouts.ctx_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let service = backend::from_config(&config.backend, &config.timeouts)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, service);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
