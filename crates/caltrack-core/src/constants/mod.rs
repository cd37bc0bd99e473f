// ABOUTME: Application-wide constants for metabolic formulas, pacing and check-in policy
// ABOUTME: Organized by domain so configuration defaults have a single source of truth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants
//!
//! Default values for every tunable number in the calorie pipeline.
//! `NutritionConfig` in the server crate starts from these and may override
//! them from the environment.

/// Service identity used in logs and health responses
pub mod service_names {
    /// Canonical service name
    pub const CALTRACK_SERVER: &str = "caltrack-server";
}

/// Mifflin-St Jeor equation coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for
/// resting energy expenditure. *Am J Clin Nutr*, 51(2), 241-247.
pub mod mifflin_st_jeor {
    /// kcal per kilogram of body weight
    pub const WEIGHT_COEF: f64 = 10.0;
    /// kcal per centimeter of height
    pub const HEIGHT_COEF: f64 = 6.25;
    /// kcal per year of age (subtracted)
    pub const AGE_COEF: f64 = -5.0;
    /// Male offset
    pub const MALE_CONSTANT: f64 = 5.0;
    /// Female offset
    pub const FEMALE_CONSTANT: f64 = -161.0;
}

/// TDEE activity multipliers
pub mod activity_factors {
    /// `no_active`: little or no exercise
    pub const NO_ACTIVE: f64 = 1.2;
    /// `light_active`: light exercise 1-3 days/week
    pub const LIGHT_ACTIVE: f64 = 1.375;
    /// `moderate_active`: moderate exercise 3-5 days/week
    pub const MODERATE_ACTIVE: f64 = 1.55;
    /// `high_active`: hard exercise 6-7 days/week
    pub const HIGH_ACTIVE: f64 = 1.725;
    /// `extra_active`: hard exercise or physical labor every day
    pub const EXTRA_ACTIVE: f64 = 1.9;
}

/// Unit conversion and energy density
pub mod units {
    /// Pounds per kilogram
    pub const LBS_PER_KG: f64 = 2.205;
    /// Decimal places kept when converting between kg and lbs
    pub const CONVERSION_DECIMALS: i32 = 2;
    /// Energy in one pound of body mass (kcal)
    pub const KCAL_PER_LB: f64 = 3000.0;
}

/// Rounding applied to every persisted calorie figure
pub mod rounding {
    /// Calorie values are floored to a multiple of this step
    pub const CALORIE_STEP: i64 = 5;
}

/// Sentinel stored in derived fields that have not been computed yet
pub const UNSET_CALORIES: i64 = -1;

/// Weekly check-in evaluation policy
pub mod check_in {
    /// Number of samples spanning the comparison window (two weeks of daily samples)
    pub const WINDOW_SAMPLES: usize = 14;
    /// Evaluate on every Nth sample
    pub const EVALUATION_INTERVAL: usize = 7;
    /// Minimum expected weight change across the window (kg)
    pub const STAGNATION_THRESHOLD_KG: f64 = 1.0;
    /// Calorie step applied when stagnation is confirmed
    pub const ADJUSTMENT_KCAL: i64 = 200;
}

/// Low-intake advisory thresholds (kcal/day)
pub mod intake_thresholds {
    /// At or below this value intake is dangerously low for anyone
    pub const ABSOLUTE_FLOOR: i64 = 800;
    /// Recommended minimum for men
    pub const MALE_MINIMUM: i64 = 1500;
    /// Recommended minimum for women
    pub const FEMALE_MINIMUM: i64 = 1200;
}

/// Sanity bounds for profile metrics accepted over the API
pub mod limits {
    /// Largest accepted body weight (kg)
    pub const MAX_WEIGHT_KG: f64 = 500.0;
    /// Largest accepted height (cm)
    pub const MAX_HEIGHT_CM: f64 = 300.0;
    /// Largest accepted age (years)
    pub const MAX_AGE_YEARS: u32 = 130;
    /// Longest accepted pacing timeframe (days)
    pub const MAX_TIMEFRAME_DAYS: i64 = 3650;
}
