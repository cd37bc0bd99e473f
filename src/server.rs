// ABOUTME: HTTP server assembly and lifecycle for the Caltrack API
// ABOUTME: Builds the router with CORS, tracing and timeout layers and serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server bootstrap
//!
//! [`build_router`] is what tests drive; [`run`] binds the listener and
//! serves until Ctrl-C or SIGTERM.

use crate::config::environment::{DatabaseUrl, ServerConfig};
use crate::config::intelligence_config::NutritionConfig;
use crate::database::Database;
use crate::middleware::{
    propagate_request_id_layer, set_request_id_layer, setup_cors, trace_layer,
};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, ProfileRoutes};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

/// Assemble every route and the shared middleware stack
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);
    let timeout = Duration::from_secs(resources.config.request_timeout_secs);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(ProfileRoutes::routes(resources))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(set_request_id_layer())
}

/// Open the database configured in `config`, creating the parent directory of a file database
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the database cannot be opened
pub async fn open_database(config: &ServerConfig) -> Result<Database> {
    if let DatabaseUrl::SQLite { path } = &config.database.url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }
    }

    let database = Database::new(&config.database.url.to_connection_string())
        .await
        .context("Failed to open database")?;
    info!(database = %config.database.url, "Database connected");
    Ok(database)
}

/// Serve the API until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the address cannot be bound
/// or the server fails
pub async fn run(config: ServerConfig, nutrition: NutritionConfig) -> Result<()> {
    info!("{}", config.summary());

    let database = open_database(&config).await?;
    let addr = config.bind_address();
    let resources = Arc::new(ServerResources::new(database, config, nutrition));
    let app = build_router(resources);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Caltrack server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Caltrack server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
