// ABOUTME: Weekly check-in policy that appends weight samples and detects two-week stalls
// ABOUTME: Evaluates on every seventh sample once fourteen exist and proposes a calorie step
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Check-in policy
//!
//! A check-in appends one sample to the profile's weight log. Once the log
//! holds a full comparison window (14 samples) it is evaluated on every
//! seventh sample: the newest sample is compared with the one two weeks
//! earlier, and if the weight did not move at least the threshold in the
//! direction of the goal a corrective calorie step is proposed.
//!
//! The proposal is returned as a [`StagnationAssessment`]; nothing here
//! changes `calorie_intake`. Applying the step is the caller's confirmation
//! protocol.

use super::intake_warnings::{warn_if_low, IntakeAdvisory};
use crate::config::intelligence_config::{CheckInConfig, NutritionConfig};
use crate::errors::AppResult;
use crate::models::{validate_weight_kg, AdjustmentDirection, GoalPhase, Profile};
use serde::Serialize;

/// A detected stall and the adjustment that would counter it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StagnationAssessment {
    /// Which way the target would move
    pub direction: AdjustmentDirection,
    /// Newest sample (kg)
    pub latest_weight: f64,
    /// Sample one window back (kg)
    pub anchor_weight: f64,
    /// Active target at detection time
    pub baseline_intake: i64,
    /// Target if the adjustment is accepted
    pub proposed_intake: i64,
}

/// Result of recording one check-in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInOutcome {
    /// Length of the weight log after the append
    pub checkin_count: usize,
    /// Whether this sample landed on an evaluation boundary
    pub evaluated: bool,
    /// Stall detected at this boundary, if any
    pub assessment: Option<StagnationAssessment>,
    /// Low-intake advisories raised for the proposed target
    pub advisories: Vec<IntakeAdvisory>,
}

/// True when a log of `count` samples is due for evaluation
#[must_use]
pub const fn is_weekly_boundary(count: usize, config: &CheckInConfig) -> bool {
    count >= config.window_samples && count % config.evaluation_interval == 0
}

/// Append `weight_kg` to the profile's log and evaluate stagnation at weekly boundaries
///
/// Evaluation is skipped while the profile has no active calorie target.
///
/// # Errors
///
/// Returns `InvalidInput` if the weight is not a positive finite number of kilograms;
/// the log is left untouched in that case
pub fn record_checkin(
    profile: &mut Profile,
    weight_kg: f64,
    config: &NutritionConfig,
) -> AppResult<CheckInOutcome> {
    validate_weight_kg("weight", weight_kg)?;
    profile.weight_check.push(weight_kg);

    let checkin_count = profile.weight_check.len();
    let evaluated =
        is_weekly_boundary(checkin_count, &config.check_in) && profile.has_calorie_target();

    let mut outcome = CheckInOutcome {
        checkin_count,
        evaluated,
        assessment: None,
        advisories: Vec::new(),
    };
    if !evaluated {
        return Ok(outcome);
    }

    let (Some(latest_weight), Some(anchor_weight)) = (
        profile.weight_check.latest(),
        profile
            .weight_check
            .get(checkin_count - config.check_in.window_samples),
    ) else {
        return Ok(outcome);
    };

    let threshold = config.check_in.stagnation_threshold_kg;
    let phase = GoalPhase::from_intakes(profile.calorie_intake, profile.base_calorie_intake);
    let stagnant = match phase {
        GoalPhase::Gaining => latest_weight < anchor_weight + threshold,
        GoalPhase::LosingOrMaintaining => latest_weight > anchor_weight - threshold,
    };
    if !stagnant {
        return Ok(outcome);
    }

    let direction = phase.corrective_direction();
    let proposed_intake = direction.apply(profile.calorie_intake, config.check_in.adjustment_kcal);
    if direction == AdjustmentDirection::Decrease {
        outcome.advisories = warn_if_low(proposed_intake, profile.sex, &config.intake_warnings);
    }

    outcome.assessment = Some(StagnationAssessment {
        direction,
        latest_weight,
        anchor_weight,
        baseline_intake: profile.calorie_intake,
        proposed_intake,
    });
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_boundaries() {
        let config = CheckInConfig::default();
        assert!(!is_weekly_boundary(7, &config));
        assert!(!is_weekly_boundary(13, &config));
        assert!(is_weekly_boundary(14, &config));
        assert!(!is_weekly_boundary(20, &config));
        assert!(is_weekly_boundary(21, &config));
        assert!(is_weekly_boundary(28, &config));
    }
}
