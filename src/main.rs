//! route-dispatch server.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │               ROUTE DISPATCH                  │
//!                     │                                              │
//!   Client Request    │  ┌──────────┐    ┌──────────┐    ┌─────────┐ │
//!   ──────────────────┼─▶│   http   │───▶│ routing  │───▶│ handler │ │
//!                     │  │  server  │    │ resolve  │    │ (app)   │ │
//!                     │  └──────────┘    └──────────┘    └────┬────┘ │
//!                     │       ▲                                │      │
//!   Client Response   │       │    404 / 405 on routing miss   │      │
//!   ◀─────────────────┼───────┴────────────────────────────────┘      │
//!                     │                                              │
//!                     │  config · observability · lifecycle          │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_dispatch::app;
use route_dispatch::config::{load_config, validate_config, AppConfig, ConfigError};
use route_dispatch::http::HttpServer;
use route_dispatch::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "route-dispatch")]
#[command(about = "Serve the application route table", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

fn load(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        case_sensitive = config.routing.case_sensitive,
        trailing_slash = ?config.routing.trailing_slash,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let router = app::build_router(config.routing)?;
    for route in router.routes() {
        tracing::info!(
            method = %route.method(),
            pattern = %route.pattern(),
            name = route.name().unwrap_or("-"),
            "Serving route"
        );
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, router);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
