// ABOUTME: Core data models for the Caltrack server
// ABOUTME: Re-exports Profile, WeightLog, StagnationEvent and their enumerations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Profile`: one record per user with metrics and derived calorie fields
//! - `WeightLog`: append-only daily weight samples with a dirty flag
//! - `StagnationEvent`: a detected stall awaiting the user's confirmation

mod profile;
mod stagnation;

pub use profile::{validate_weight_kg, ActivityLevel, NewProfile, Profile, Sex, WeightLog};
pub use stagnation::{AdjustmentDirection, GoalPhase, StagnationEvent, StagnationStatus};
