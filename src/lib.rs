// ABOUTME: Main library entry point for the Caltrack calorie tracking API
// ABOUTME: Body metrics profiles, calorie target calculations and weekly check-in evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Caltrack Server
//!
//! An HTTP backend that stores one body-metrics profile per user and derives
//! a recommended daily calorie intake from it:
//!
//! 1. **BMR** from the Mifflin-St Jeor equation
//! 2. **Maintenance intake** (TDEE) from BMR and an activity multiplier
//! 3. **Daily target** pacing the user from current to goal weight over a timeframe
//! 4. **Check-ins** that log daily weights and, every week once two weeks of data
//!    exist, propose a +/-200 kcal adjustment when the weight has stalled
//!
//! Proposals are confirmed or declined through a separate call; a check-in
//! never changes the target on its own.
//!
//! ## Architecture
//!
//! - **Intelligence**: pure calculators and the check-in policy
//! - **Services**: per-profile read-modify-write orchestration
//! - **Database**: `SQLite` persistence behind the `ProfileStore` trait
//! - **Routes**: thin axum handlers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use caltrack_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Caltrack server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// `SQLite` persistence for profiles and stagnation events
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Nutrition calculators and the check-in policy
pub mod intelligence;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for request tracing and CORS
pub mod middleware;

/// Domain models
pub mod models;

/// Shared state for route handlers
pub mod resources;

/// `HTTP` routes
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Domain service layer for protocol-agnostic business logic
pub mod services;
