// ABOUTME: FitPet server binary: config, database, router assembly and serving
// ABOUTME: Environment-driven config with CLI overrides for port and database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

//! FitPet backend server binary

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fitpet_server::config::ServerConfig;
use fitpet_server::database::Database;
use fitpet_server::logging;
use fitpet_server::resources::ServerResources;
use fitpet_server::routes;

#[derive(Parser)]
#[command(name = "fitpet-server", about = "FitPet gamification backend server")]
struct Args {
    /// HTTP listen port (overrides FITPET_HTTP_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Database URL (overrides FITPET_DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;

    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    tracing::info!("Starting FitPet server: {}", config.summary());

    let database = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, config));

    let app = routes::router(resources)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
