//! URL redirection service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ store resolver ──miss──▶ json resolver
//!                                          │ hit                   │ hit   │ miss
//!                                          ▼                       ▼       ▼
//!     ◀────────────── 302 Found ◀──────────┴───────────────────────┘   yaml resolver
//!                                                                          │ miss
//!                                                                          ▼
//!     ◀────────────── 200 OK ◀──────── base handler ◀──miss── map resolver
//! ```
//!
//! The chain above is the default; its order and contents come from the
//! `sources` list of the configuration file.

use std::path::PathBuf;

use clap::Parser;
use urlshort::config::loader::load_or_default;
use urlshort::lifecycle::startup;
use urlshort::observability::{logging, metrics};
use urlshort::Shutdown;

#[derive(Parser)]
#[command(name = "urlshort")]
#[command(about = "Redirect request paths through a chain of lookup sources", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_or_default(args.config.as_deref())?;
    logging::init(&config.observability);

    tracing::info!("urlshort v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        sources = config.sources.len(),
        store_path = %config.store.path.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let (server, listener) = startup::prepare(config).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
