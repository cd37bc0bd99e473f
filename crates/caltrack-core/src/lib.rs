// ABOUTME: Core types and constants for the Caltrack calorie tracking server
// ABOUTME: Foundation crate with error handling, domain models, and nutrition constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Caltrack Core
//!
//! Foundation crate providing shared types and constants for the Caltrack
//! server. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Formula coefficients, unit factors and advisory thresholds
//! - **models**: `Profile`, `WeightLog` and `StagnationEvent`

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Profile, weight log, stagnation events)
pub mod models;
