// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Holds the database, the profile service and the loaded server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::environment::ServerConfig;
use crate::config::intelligence_config::NutritionConfig;
use crate::database::{Database, ProfileStore};
use crate::services::ProfileService;
use std::sync::Arc;

/// Centralized resource container for route handlers
#[derive(Clone)]
pub struct ServerResources {
    /// `SQLite` store
    pub database: Arc<Database>,
    /// Profile operations
    pub profiles: Arc<ProfileService>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, config: ServerConfig, nutrition: NutritionConfig) -> Self {
        let database = Arc::new(database);
        let store: Arc<dyn ProfileStore> = database.clone();
        Self {
            profiles: Arc::new(ProfileService::new(store, nutrition)),
            database,
            config: Arc::new(config),
        }
    }
}
