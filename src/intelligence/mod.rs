// ABOUTME: Intelligence module with the calorie calculators and the check-in policy
// ABOUTME: Re-exports the pure functions used by the profile service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Pure nutrition algorithms:
//!
//! - [`nutrition_calculator`]: BMR, maintenance intake, goal pacing and unit conversion
//! - [`stagnation`]: weekly check-in evaluation
//! - [`intake_warnings`]: low-intake advisories

/// BMR, TDEE and daily target calculations
pub mod nutrition_calculator;

/// Low calorie intake advisories
pub mod intake_warnings;

/// Check-in stagnation policy
pub mod stagnation;

pub use intake_warnings::{check_intake, warn_if_low, IntakeAdvisory};
pub use nutrition_calculator::{
    calculate_base_intake, calculate_daily_target, calculate_mifflin_st_jeor, kg_to_lbs,
    lbs_to_kg,
};
pub use stagnation::{is_weekly_boundary, record_checkin, CheckInOutcome, StagnationAssessment};
