// ABOUTME: Server binary for the Caltrack calorie tracking API
// ABOUTME: Parses overrides, loads configuration, initializes logging and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Caltrack Server Binary
//!
//! Starts the HTTP API backed by the configured `SQLite` database.

use anyhow::Result;
use caltrack_server::{
    config::{environment::DatabaseUrl, NutritionConfig, ServerConfig},
    logging, server,
};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "caltrack-server")]
#[command(about = "Caltrack - body metrics tracking and daily calorie target API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:<path>` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(database_url)?;
    }

    info!("Starting Caltrack server");

    let nutrition = NutritionConfig::load()?;

    if let Err(e) = server::run(config, nutrition).await {
        error!("Server error: {:#}", e);
        return Err(e);
    }
    Ok(())
}
