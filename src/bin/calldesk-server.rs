// ABOUTME: Calldesk API server binary
// ABOUTME: Loads config, opens the store, and serves the axum router until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use calldesk::config::ServerConfig;
use calldesk::logging;
use calldesk::routes::{self, AppState};
use calldesk::store;

#[derive(Parser)]
#[command(name = "calldesk-server", about = "Calldesk call-center API server")]
struct Args {
    /// HTTP port (overrides HTTP_PORT)
    #[arg(long)]
    http_port: Option<u16>,

    /// Sqlite database URL (overrides DATABASE_URL); omit for the in-memory
    /// demo store
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }
    if let Some(url) = args.database_url {
        config.database_url = Some(url);
    }

    logging::init_from_env()?;
    info!("Starting calldesk-server: {}", config.summary());

    let repository = store::connect_or_fallback(config.database_url.as_deref()).await?;
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let app = routes::router(AppState::new(repository, config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}
