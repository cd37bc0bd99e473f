// ABOUTME: Constants module re-exporting nutrition constants plus server defaults
// ABOUTME: Environment-backed accessors for ports, hosts, database URL and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Formula constants live in `caltrack-core` and are re-exported here so the
//! server can address them as `crate::constants::*`. Deployment defaults and
//! the environment accessors are local to the server.

use std::env;

pub use caltrack_core::constants::*;

/// Deployment defaults
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default bind interface
    pub const HTTP_HOST: &str = "127.0.0.1";
    /// Default `SQLite` database file
    pub const DATABASE_PATH: &str = "./data/caltrack.db";
    /// Default per-request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Environment-based configuration
pub mod env_config {
    use super::{defaults, env};

    /// Get HTTP server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::HTTP_PORT)
    }

    /// Get bind host from environment or default
    #[must_use]
    pub fn http_host() -> String {
        env::var("HOST").unwrap_or_else(|_| defaults::HTTP_HOST.to_owned())
    }

    /// Get database URL from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| format!("sqlite:{}", defaults::DATABASE_PATH))
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned())
    }

    /// Get deployment environment from environment or default
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_owned())
    }
}
