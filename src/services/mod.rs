// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Provides protocol-agnostic profile operations reusable by any transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Protocol-agnostic business logic. Route handlers parse requests and
//! delegate here, so the same rules apply regardless of the entry point.

/// Profile calorie computations, check-ins and adjustment confirmation
pub mod profiles;

pub use profiles::{
    AdjustmentResult, CheckInResult, DailyTargetResult, ProfileService, WeightUnit,
};
