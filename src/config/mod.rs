// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Handles environment configs and nutrition algorithm settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Caltrack server
//!
//! - **Environment**: server configuration from environment variables
//! - **Intelligence**: nutrition formula coefficients and check-in policy

/// Environment and server configuration
pub mod environment;

/// Nutrition algorithm configuration
pub mod intelligence_config;

pub use environment::ServerConfig;
pub use intelligence_config::{ConfigError, NutritionConfig};
