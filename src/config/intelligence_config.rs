// ABOUTME: Nutrition algorithm configuration for BMR, TDEE, goal pacing and check-in policy
// ABOUTME: Typed defaults from constants, environment overrides, validation and a global instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Configuration Module
//!
//! Every number the calculators use lives here so it can be validated once at
//! startup. Defaults reproduce the published formulas; environment variables
//! with the `CALTRACK_` prefix override individual values.
//!
//! ```bash
//! export CALTRACK_ADJUSTMENT_KCAL=150
//! export CALTRACK_FEMALE_MIN_KCAL=1300
//! ```

use crate::constants::{
    activity_factors, check_in, intake_thresholds, mifflin_st_jeor, rounding, units,
};
use crate::models::ActivityLevel;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Range constraint between values violated
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Environment value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Single value outside its accepted range
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: mifflin_st_jeor::WEIGHT_COEF,
            msj_height_coef: mifflin_st_jeor::HEIGHT_COEF,
            msj_age_coef: mifflin_st_jeor::AGE_COEF,
            msj_male_constant: mifflin_st_jeor::MALE_CONSTANT,
            msj_female_constant: mifflin_st_jeor::FEMALE_CONSTANT,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// `no_active`: 1.2
    pub no_active: f64,
    /// `light_active`: 1.375
    pub light_active: f64,
    /// `moderate_active`: 1.55
    pub moderate_active: f64,
    /// `high_active`: 1.725
    pub high_active: f64,
    /// `extra_active`: 1.9
    pub extra_active: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::NoActive => self.no_active,
            ActivityLevel::LightActive => self.light_active,
            ActivityLevel::ModerateActive => self.moderate_active,
            ActivityLevel::HighActive => self.high_active,
            ActivityLevel::ExtraActive => self.extra_active,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            no_active: activity_factors::NO_ACTIVE,
            light_active: activity_factors::LIGHT_ACTIVE,
            moderate_active: activity_factors::MODERATE_ACTIVE,
            high_active: activity_factors::HIGH_ACTIVE,
            extra_active: activity_factors::EXTRA_ACTIVE,
        }
    }
}

/// Goal pacing (daily target from weight delta and timeframe)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPacingConfig {
    /// Pounds per kilogram used for the conversion
    pub lbs_per_kg: f64,
    /// Decimal places kept after conversion
    pub conversion_decimals: i32,
    /// Energy in one pound of body mass (kcal)
    pub kcal_per_lb: f64,
    /// Calorie figures are floored to a multiple of this step
    pub calorie_step: i64,
}

impl Default for GoalPacingConfig {
    fn default() -> Self {
        Self {
            lbs_per_kg: units::LBS_PER_KG,
            conversion_decimals: units::CONVERSION_DECIMALS,
            kcal_per_lb: units::KCAL_PER_LB,
            calorie_step: rounding::CALORIE_STEP,
        }
    }
}

/// Weekly check-in stagnation policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInConfig {
    /// Samples spanned by the comparison window
    pub window_samples: usize,
    /// Evaluate on every Nth sample once the window is full
    pub evaluation_interval: usize,
    /// Minimum expected change across the window (kg)
    pub stagnation_threshold_kg: f64,
    /// Calorie step proposed on stagnation
    pub adjustment_kcal: i64,
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self {
            window_samples: check_in::WINDOW_SAMPLES,
            evaluation_interval: check_in::EVALUATION_INTERVAL,
            stagnation_threshold_kg: check_in::STAGNATION_THRESHOLD_KG,
            adjustment_kcal: check_in::ADJUSTMENT_KCAL,
        }
    }
}

/// Low-intake advisory thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeWarningConfig {
    /// Advisory fires at or below this value regardless of sex
    pub absolute_floor_kcal: i64,
    /// Advisory fires below this value for men
    pub male_minimum_kcal: i64,
    /// Advisory fires below this value for everyone else
    pub female_minimum_kcal: i64,
}

impl Default for IntakeWarningConfig {
    fn default() -> Self {
        Self {
            absolute_floor_kcal: intake_thresholds::ABSOLUTE_FLOOR,
            male_minimum_kcal: intake_thresholds::MALE_MINIMUM,
            female_minimum_kcal: intake_thresholds::FEMALE_MINIMUM,
        }
    }
}

/// Nutrition algorithm configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Basal Metabolic Rate (BMR) calculation settings
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Daily target pacing
    pub goal_pacing: GoalPacingConfig,
    /// Check-in stagnation policy
    pub check_in: CheckInConfig,
    /// Low-intake advisories
    pub intake_warnings: IntakeWarningConfig,
}

impl NutritionConfig {
    /// Load configuration from the environment on top of the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first constraint that does not hold
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = [
            self.activity_factors.no_active,
            self.activity_factors.light_active,
            self.activity_factors.moderate_active,
            self.activity_factors.high_active,
            self.activity_factors.extra_active,
        ];
        if factors.iter().any(|f| !f.is_finite() || *f < 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "activity factors must be finite and >= 1.0",
            ));
        }
        if factors.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ConfigError::InvalidRange(
                "activity factors must not decrease with activity level",
            ));
        }

        let pacing = &self.goal_pacing;
        if pacing.lbs_per_kg <= 0.0 || pacing.kcal_per_lb <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "lbs_per_kg and kcal_per_lb must be positive",
            ));
        }
        if pacing.calorie_step < 1 {
            return Err(ConfigError::ValueOutOfRange("calorie_step must be >= 1"));
        }
        if !(0..=6).contains(&pacing.conversion_decimals) {
            return Err(ConfigError::ValueOutOfRange(
                "conversion_decimals must be between 0 and 6",
            ));
        }

        let check_in = &self.check_in;
        if check_in.evaluation_interval == 0 || check_in.window_samples < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "evaluation_interval must be >= 1 and window_samples >= 2",
            ));
        }
        if check_in.stagnation_threshold_kg < 0.0 || check_in.adjustment_kcal < 1 {
            return Err(ConfigError::ValueOutOfRange(
                "stagnation threshold must be >= 0 and adjustment >= 1 kcal",
            ));
        }

        let warnings = &self.intake_warnings;
        if warnings.absolute_floor_kcal >= warnings.female_minimum_kcal
            || warnings.absolute_floor_kcal >= warnings.male_minimum_kcal
        {
            return Err(ConfigError::InvalidRange(
                "absolute floor must be below both sex-specific minimums",
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        override_from_env("CALTRACK_LBS_PER_KG", &mut self.goal_pacing.lbs_per_kg)?;
        override_from_env("CALTRACK_KCAL_PER_LB", &mut self.goal_pacing.kcal_per_lb)?;
        override_from_env("CALTRACK_CALORIE_STEP", &mut self.goal_pacing.calorie_step)?;

        override_from_env(
            "CALTRACK_STAGNATION_WINDOW",
            &mut self.check_in.window_samples,
        )?;
        override_from_env(
            "CALTRACK_EVALUATION_INTERVAL",
            &mut self.check_in.evaluation_interval,
        )?;
        override_from_env(
            "CALTRACK_STAGNATION_THRESHOLD_KG",
            &mut self.check_in.stagnation_threshold_kg,
        )?;
        override_from_env("CALTRACK_ADJUSTMENT_KCAL", &mut self.check_in.adjustment_kcal)?;

        override_from_env(
            "CALTRACK_ABSOLUTE_FLOOR_KCAL",
            &mut self.intake_warnings.absolute_floor_kcal,
        )?;
        override_from_env(
            "CALTRACK_MALE_MIN_KCAL",
            &mut self.intake_warnings.male_minimum_kcal,
        )?;
        override_from_env(
            "CALTRACK_FEMALE_MIN_KCAL",
            &mut self.intake_warnings.female_minimum_kcal,
        )?;

        Ok(self)
    }
}

fn override_from_env<T: FromStr>(key: &str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(raw) = std::env::var(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {key}: '{raw}'")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = NutritionConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.activity_factors.factor(ActivityLevel::ModerateActive) - 1.55).abs() < f64::EPSILON);
        assert_eq!(config.check_in.adjustment_kcal, 200);
    }

    #[test]
    fn test_decreasing_factors_rejected() {
        let mut config = NutritionConfig::default();
        config.activity_factors.high_active = 1.3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_floor_above_minimum_rejected() {
        let mut config = NutritionConfig::default();
        config.intake_warnings.absolute_floor_kcal = 1300;
        assert!(config.validate().is_err());
    }
}
