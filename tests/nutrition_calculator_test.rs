// ABOUTME: Integration tests for the BMR, maintenance intake and daily target calculators
// ABOUTME: Covers the reference profiles, rounding rules and pacing direction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use caltrack_server::config::intelligence_config::NutritionConfig;
use caltrack_server::errors::ErrorCode;
use caltrack_server::intelligence::{
    calculate_base_intake, calculate_daily_target, calculate_mifflin_st_jeor,
};
use caltrack_server::models::{ActivityLevel, Sex};

fn config() -> NutritionConfig {
    NutritionConfig::default()
}

fn base_intake(bmr: i64, level: ActivityLevel) -> i64 {
    let config = config();
    calculate_base_intake(
        bmr,
        level,
        &config.activity_factors,
        config.goal_pacing.calorie_step,
    )
    .unwrap()
}

// ============================================================================
// BMR
// ============================================================================

#[test]
fn test_male_reference_bmr() {
    let bmr = calculate_mifflin_st_jeor(91.0, 178.0, 26, Sex::Male, &config().bmr).unwrap();
    assert_eq!(bmr, 1898);
}

#[test]
fn test_female_reference_bmr() {
    let bmr = calculate_mifflin_st_jeor(64.0, 160.0, 18, Sex::Female, &config().bmr).unwrap();
    assert_eq!(bmr, 1389);
}

#[test]
fn test_sex_offset_difference() {
    let config = config();
    let male = calculate_mifflin_st_jeor(70.0, 170.0, 40, Sex::Male, &config.bmr).unwrap();
    let female = calculate_mifflin_st_jeor(70.0, 170.0, 40, Sex::Female, &config.bmr).unwrap();
    assert_eq!(male - female, 166);
}

#[test]
fn test_bmr_is_deterministic() {
    let config = config();
    let first = calculate_mifflin_st_jeor(91.0, 178.0, 26, Sex::Male, &config.bmr).unwrap();
    let second = calculate_mifflin_st_jeor(91.0, 178.0, 26, Sex::Male, &config.bmr).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_bmr_rejects_invalid_metrics() {
    let config = config();
    for (weight, height, age) in [(0.0, 170.0, 30), (70.0, -1.0, 30), (70.0, 170.0, 0)] {
        let err = calculate_mifflin_st_jeor(weight, height, age, Sex::Male, &config.bmr)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
    assert!(calculate_mifflin_st_jeor(f64::NAN, 170.0, 30, Sex::Male, &config.bmr).is_err());
}

// ============================================================================
// Maintenance intake
// ============================================================================

#[test]
fn test_male_moderate_base_intake() {
    assert_eq!(base_intake(1898, ActivityLevel::ModerateActive), 2940);
}

#[test]
fn test_female_base_intake_by_level() {
    assert_eq!(base_intake(1389, ActivityLevel::ExtraActive), 2635);
    assert_eq!(base_intake(1389, ActivityLevel::HighActive), 2395);
}

#[test]
fn test_base_intake_monotonic_in_activity() {
    for bmr in [1200, 1389, 1898, 2400] {
        let intakes: Vec<i64> = ActivityLevel::ALL
            .iter()
            .map(|level| base_intake(bmr, *level))
            .collect();
        assert!(
            intakes.windows(2).all(|pair| pair[0] <= pair[1]),
            "not monotonic for bmr {bmr}: {intakes:?}"
        );
    }
}

#[test]
fn test_base_intake_is_floored_multiple_of_five() {
    let config = config();
    for bmr in (1000..2600).step_by(37) {
        for level in ActivityLevel::ALL {
            let base = base_intake(bmr, level);
            let unrounded = bmr as f64 * config.activity_factors.factor(level);
            assert_eq!(base % 5, 0);
            assert!(base as f64 <= unrounded);
            assert!(unrounded - (base as f64) < 6.0);
        }
    }
}

#[test]
fn test_base_intake_requires_bmr() {
    let config = config();
    let err = calculate_base_intake(-1, ActivityLevel::LightActive, &config.activity_factors, 5)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);
}

// ============================================================================
// Daily target
// ============================================================================

#[test]
fn test_male_cut_target() {
    let target = calculate_daily_target(91.0, 80.0, 2940, 60, &config().goal_pacing).unwrap();
    assert_eq!(target, 1725);
}

#[test]
fn test_female_bulk_target() {
    let target = calculate_daily_target(64.0, 80.0, 2635, 60, &config().goal_pacing).unwrap();
    assert_eq!(target, 4395);
    assert!(target >= 4385);
}

#[test]
fn test_target_direction_follows_goal() {
    let pacing = config().goal_pacing;
    for days in [7, 30, 90, 365] {
        let gain = calculate_daily_target(70.0, 75.0, 2500, days, &pacing).unwrap();
        let lose = calculate_daily_target(70.0, 65.0, 2500, days, &pacing).unwrap();
        let hold = calculate_daily_target(70.0, 70.0, 2500, days, &pacing).unwrap();
        assert!(gain >= 2500, "gain {gain} over {days} days");
        assert!(lose <= 2500, "lose {lose} over {days} days");
        assert_eq!(hold, 2500);
        for value in [gain, lose, hold] {
            assert_eq!(value.rem_euclid(5), 0);
        }
    }
}

#[test]
fn test_longer_timeframe_is_gentler() {
    let pacing = config().goal_pacing;
    let fast = calculate_daily_target(91.0, 80.0, 2940, 30, &pacing).unwrap();
    let slow = calculate_daily_target(91.0, 80.0, 2940, 120, &pacing).unwrap();
    assert!(fast < slow);
}

#[test]
fn test_target_rejects_invalid_timeframe() {
    let pacing = config().goal_pacing;
    assert_eq!(
        calculate_daily_target(91.0, 80.0, 2940, 0, &pacing)
            .unwrap_err()
            .code,
        ErrorCode::InvalidInput
    );
    assert_eq!(
        calculate_daily_target(91.0, 80.0, 2940, 10_000, &pacing)
            .unwrap_err()
            .code,
        ErrorCode::ValueOutOfRange
    );
}

#[test]
fn test_target_requires_base_intake() {
    let err = calculate_daily_target(91.0, 80.0, -1, 60, &config().goal_pacing).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);
}
