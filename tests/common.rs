// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory databases, services, routers and seeded profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `caltrack_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use axum::Router;
use caltrack_server::{
    config::environment::ServerConfig,
    config::intelligence_config::{GoalPacingConfig, NutritionConfig},
    database::{Database, ProfileStore},
    intelligence::lbs_to_kg,
    models::{NewProfile, Sex},
    resources::ServerResources,
    server::build_router,
    services::ProfileService,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Profile service over a fresh in-memory database with default formulas
pub async fn create_test_service() -> Result<(Arc<Database>, ProfileService)> {
    let database = create_test_database().await?;
    let store: Arc<dyn ProfileStore> = database.clone();
    Ok((database, ProfileService::new(store, NutritionConfig::default())))
}

/// Shared resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(Arc::new(ServerResources::new(
        database,
        ServerConfig::default(),
        NutritionConfig::default(),
    )))
}

/// Full router with middleware over a fresh in-memory database
pub async fn create_test_router() -> Result<Router> {
    Ok(build_router(create_test_resources().await?))
}

/// 91 kg / 178 cm / 26 / male, moderately active, aiming for 80 kg
pub fn male_profile_request() -> NewProfile {
    NewProfile {
        weight: 91.0,
        height: 178.0,
        age: 26,
        target_weight: 80.0,
        sex: Sex::Male,
        activity_level: "moderate_active".to_owned(),
        weight_check: Vec::new(),
    }
}

/// 64 kg / 160 cm / 18 / female, extra active, aiming for 80 kg
pub fn female_profile_request() -> NewProfile {
    NewProfile {
        weight: 64.0,
        height: 160.0,
        age: 18,
        target_weight: 80.0,
        sex: Sex::Female,
        activity_level: "extra_active".to_owned(),
        weight_check: Vec::new(),
    }
}

fn history(first_kg: f64, pounds: &[f64]) -> Vec<f64> {
    let pacing = GoalPacingConfig::default();
    std::iter::once(first_kg)
        .chain(pounds.iter().map(|lbs| lbs_to_kg(*lbs, &pacing)))
        .collect()
}

/// Thirteen samples of a cut that drifted back up; a 91 kg check-in completes two weeks
pub fn male_stalled_history() -> Vec<f64> {
    history(
        91.0,
        &[
            200.0, 200.0, 199.0, 199.0, 200.0, 199.0, 198.0, 198.0, 197.0, 197.0, 196.0, 196.0,
        ],
    )
}

/// Thirteen samples of a bulk that went nowhere; a 64 kg check-in completes two weeks
pub fn female_stalled_history() -> Vec<f64> {
    history(
        64.0,
        &[
            141.0, 140.0, 142.0, 141.0, 142.0, 143.0, 143.0, 142.0, 143.0, 142.0, 143.0, 144.0,
        ],
    )
}
