// ABOUTME: Route module organization for Caltrack HTTP endpoints
// ABOUTME: Health probes and the profile API, each exposing a routes() constructor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Caltrack server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Health check and readiness routes
pub mod health;
/// Profile, calorie and check-in routes
pub mod profiles;

pub use health::HealthRoutes;
pub use profiles::ProfileRoutes;
