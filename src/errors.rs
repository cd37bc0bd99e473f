// ABOUTME: Unified error handling re-exported from caltrack-core
// ABOUTME: AppError, ErrorCode and the JSON error envelope used by every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Error types
//!
//! `AppError` implements `axum::response::IntoResponse` (core feature
//! `http-response`) and converts from `sqlx::Error` (core feature
//! `database-errors`), so handlers and the store can use `?` directly.

pub use caltrack_core::errors::*;
