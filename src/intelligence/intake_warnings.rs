// ABOUTME: Low calorie intake advisories checked after a target is set or an adjustment is proposed
// ABOUTME: Absolute floor plus sex-specific minimums; advisories are logged and returned, never errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::intelligence_config::IntakeWarningConfig;
use crate::logging::AppLogger;
use crate::models::Sex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-blocking low-intake advisory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntakeAdvisory {
    /// Intake at or below the absolute floor
    AbsoluteFloor,
    /// Male intake below the male minimum
    BelowMaleMinimum,
    /// Non-male intake below the female minimum
    BelowFemaleMinimum,
}

impl IntakeAdvisory {
    /// Stable machine-readable code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AbsoluteFloor => "absolute_floor",
            Self::BelowMaleMinimum => "below_male_minimum",
            Self::BelowFemaleMinimum => "below_female_minimum",
        }
    }

    /// Human-readable warning
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::AbsoluteFloor => "Calorie intake is dangerously low",
            Self::BelowMaleMinimum => "Calorie intake is below the recommended minimum for men",
            Self::BelowFemaleMinimum => {
                "Calorie intake is below the recommended minimum for women"
            }
        }
    }
}

impl fmt::Display for IntakeAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Evaluate every advisory that applies to `calorie_intake`
///
/// The floor and the sex-specific checks are independent; both can fire.
#[must_use]
pub fn check_intake(
    calorie_intake: i64,
    sex: Sex,
    config: &IntakeWarningConfig,
) -> Vec<IntakeAdvisory> {
    let mut advisories = Vec::new();
    if calorie_intake <= config.absolute_floor_kcal {
        advisories.push(IntakeAdvisory::AbsoluteFloor);
    }
    match sex {
        Sex::Male if calorie_intake < config.male_minimum_kcal => {
            advisories.push(IntakeAdvisory::BelowMaleMinimum);
        }
        Sex::Female if calorie_intake < config.female_minimum_kcal => {
            advisories.push(IntakeAdvisory::BelowFemaleMinimum);
        }
        _ => {}
    }
    advisories
}

/// Check `calorie_intake` and log a warning for each advisory raised
#[must_use]
pub fn warn_if_low(
    calorie_intake: i64,
    sex: Sex,
    config: &IntakeWarningConfig,
) -> Vec<IntakeAdvisory> {
    let advisories = check_intake(calorie_intake, sex, config);
    for advisory in &advisories {
        AppLogger::log_intake_advisory(calorie_intake, sex, *advisory);
    }
    advisories
}
