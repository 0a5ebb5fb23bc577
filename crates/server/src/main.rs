//! Berth server binary.

use anyhow::{Context, Result};
use berth_core::config::AppConfig;
use berth_server::{create_router, AppState};
use clap::Parser;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Berth - a NuGet package repository server
#[derive(Parser, Debug)]
#[command(name = "berthd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "BERTH_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Berth v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override
    // everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("BERTH_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // Initialize storage backend
    let storage = berth_storage::from_config(&config.storage)
        .await
        .context("failed to initialize storage")?;
    tracing::info!(backend = storage.backend_name(), "Storage backend initialized");

    // Verify storage connectivity before accepting requests
    storage
        .health_check()
        .await
        .context("storage health check failed")?;

    // Create application state and router
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    let state = AppState::new(config, storage);
    let app = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
