// ABOUTME: Calorie calculation algorithms using the Mifflin-St Jeor equation and goal pacing
// ABOUTME: BMR, activity-scaled maintenance intake, unit conversion and daily target calculations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Calculator Module
//!
//! Pure functions behind the metabolic calculator and the goal pacer. Every
//! coefficient comes from [`NutritionConfig`](crate::config::intelligence_config::NutritionConfig)
//! so the defaults can be overridden and validated in one place.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - Wishnofsky, M. (1958). Caloric equivalents of gained or lost weight.
//!   *American Journal of Clinical Nutrition*, 6(5), 542-546. (the 3500 kcal/lb rule; this
//!   service paces with 3000 kcal/lb)

use crate::config::intelligence_config::{ActivityFactorsConfig, BmrConfig, GoalPacingConfig};
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLevel, Sex};

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `sex_offset`
/// - Men: +5
/// - Women: -161
///
/// The result is rounded half-to-even to a whole kilocalorie.
///
/// # Errors
///
/// Returns `InvalidInput` if weight or height is not a positive finite number or age is zero
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: Sex,
    config: &BmrConfig,
) -> AppResult<i64> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AppError::invalid_input("Weight must be positive"));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(AppError::invalid_input("Height must be positive"));
    }
    if age == 0 {
        return Err(AppError::invalid_input("Age must be positive"));
    }

    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age);

    let sex_constant = match sex {
        Sex::Male => config.msj_male_constant,
        Sex::Female => config.msj_female_constant,
    };

    let bmr = weight_component + height_component + age_component + sex_constant;
    Ok(bmr.round_ties_even() as i64)
}

/// Calculate the maintenance intake (TDEE) from a stored BMR
///
/// Formula: `floor(trunc(bmr x factor) / step) x step`
///
/// Activity factors (`McArdle` et al. 2010):
/// - `no_active`: 1.2
/// - `light_active`: 1.375
/// - `moderate_active`: 1.55
/// - `high_active`: 1.725
/// - `extra_active`: 1.9
///
/// # Errors
///
/// Returns `InvalidState` if `bmr` has not been computed (below 1)
pub fn calculate_base_intake(
    bmr: i64,
    activity_level: ActivityLevel,
    config: &ActivityFactorsConfig,
    calorie_step: i64,
) -> AppResult<i64> {
    if bmr < 1 {
        return Err(AppError::invalid_state("bmr not yet computed"));
    }

    let factor = config.factor(activity_level);
    let tdee = (bmr as f64 * factor).trunc() as i64;
    Ok(floor_to_step(tdee, calorie_step))
}

/// Calculate the daily calorie target that reaches `target_kg` in `days`
///
/// Both weights are converted to pounds (two decimals). The weight delta is
/// spread evenly over the timeframe at `kcal_per_lb` and added to (gaining)
/// or subtracted from (losing/maintaining) the maintenance intake. The result
/// is floored to a multiple of the calorie step.
///
/// # Errors
///
/// Returns `InvalidInput` if `days` is not positive, `ValueOutOfRange` if it exceeds the
/// supported timeframe and `InvalidState` if the maintenance intake has not been computed
pub fn calculate_daily_target(
    current_kg: f64,
    target_kg: f64,
    base_calorie_intake: i64,
    days: i64,
    config: &GoalPacingConfig,
) -> AppResult<i64> {
    if days <= 0 {
        return Err(AppError::invalid_input("days must be a positive integer"));
    }
    if days > limits::MAX_TIMEFRAME_DAYS {
        return Err(AppError::out_of_range(format!(
            "days must not exceed {}",
            limits::MAX_TIMEFRAME_DAYS
        )));
    }
    if base_calorie_intake < 1 {
        return Err(AppError::invalid_state(
            "base calorie intake not yet computed",
        ));
    }

    let current_lbs = kg_to_lbs(current_kg, config);
    let target_lbs = kg_to_lbs(target_kg, config);
    let total_kcal = (target_lbs - current_lbs).abs() * config.kcal_per_lb;
    let per_day = total_kcal / days as f64;

    let base = base_calorie_intake as f64;
    let raw = if target_lbs > current_lbs {
        base + per_day
    } else {
        base - per_day
    };

    let step = config.calorie_step as f64;
    Ok(((raw / step).floor() * step) as i64)
}

/// Convert kilograms to pounds, rounded to the configured decimals
#[must_use]
pub fn kg_to_lbs(kg: f64, config: &GoalPacingConfig) -> f64 {
    round_to(kg * config.lbs_per_kg, config.conversion_decimals)
}

/// Convert pounds to kilograms, rounded to the configured decimals
#[must_use]
pub fn lbs_to_kg(lbs: f64, config: &GoalPacingConfig) -> f64 {
    round_to(lbs / config.lbs_per_kg, config.conversion_decimals)
}

/// Round half-to-even at `decimals` places
///
/// Rounds the exact binary value through its decimal expansion; scaling by a
/// power of ten first can manufacture ties that the stored value does not have.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let precision = usize::try_from(decimals).unwrap_or(0);
    format!("{value:.precision$}").parse().unwrap_or(value)
}

/// Floor a non-negative or negative integer to a multiple of `step`
#[must_use]
pub const fn floor_to_step(value: i64, step: i64) -> i64 {
    value.div_euclid(step) * step
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pacing() -> GoalPacingConfig {
        GoalPacingConfig::default()
    }

    #[test]
    fn test_bmr_rounds_half_to_even() {
        let config = BmrConfig::default();
        // 10*60 + 6.25*162 - 5*30 - 161 = 1301.5
        assert_eq!(
            calculate_mifflin_st_jeor(60.0, 162.0, 30, Sex::Female, &config).unwrap(),
            1302
        );
        // 10*60 + 6.25*166 - 5*30 - 161 = 1326.5
        assert_eq!(
            calculate_mifflin_st_jeor(60.0, 166.0, 30, Sex::Female, &config).unwrap(),
            1326
        );
    }

    #[test]
    fn test_base_intake_requires_bmr() {
        let factors = ActivityFactorsConfig::default();
        let err = calculate_base_intake(-1, ActivityLevel::NoActive, &factors, 5).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidState);
    }

    #[test]
    fn test_floor_to_step() {
        assert_eq!(floor_to_step(2941, 5), 2940);
        assert_eq!(floor_to_step(2940, 5), 2940);
        assert_eq!(floor_to_step(-3, 5), -5);
    }

    #[test]
    fn test_unit_conversion() {
        assert!((kg_to_lbs(80.0, &pacing()) - 176.4).abs() < 1e-9);
        assert!((kg_to_lbs(64.0, &pacing()) - 141.12).abs() < 1e-9);
        assert!((lbs_to_kg(200.0, &pacing()) - 90.7).abs() < 1e-9);
    }

    #[test]
    fn test_unit_conversion_rounds_stored_value() {
        // 79 * 2.205 is stored just below 174.195
        assert!((kg_to_lbs(79.0, &pacing()) - 174.19).abs() < 1e-9);
        assert!((kg_to_lbs(33.0, &pacing()) - 72.77).abs() < 1e-9);
        assert!((kg_to_lbs(70.0, &pacing()) - 154.35).abs() < 1e-9);
        assert_eq!(
            calculate_daily_target(79.0, 70.0, 2600, 62, &pacing()).unwrap(),
            1640
        );
    }

    #[test]
    fn test_daily_target_rejects_bad_timeframe() {
        assert!(calculate_daily_target(80.0, 70.0, 2500, 0, &pacing()).is_err());
        assert!(calculate_daily_target(80.0, 70.0, 2500, -7, &pacing()).is_err());
        assert!(calculate_daily_target(80.0, 70.0, 2500, 5000, &pacing()).is_err());
    }
}
