// ABOUTME: Stagnation event model for the propose/confirm calorie adjustment protocol
// ABOUTME: StagnationEvent, AdjustmentDirection, StagnationStatus and GoalPhase definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Which way the user is steering their weight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalPhase {
    /// Daily target above maintenance
    Gaining,
    /// Daily target at or below maintenance
    LosingOrMaintaining,
}

impl GoalPhase {
    /// Derive the phase from the active target and maintenance intake
    #[must_use]
    pub const fn from_intakes(calorie_intake: i64, base_calorie_intake: i64) -> Self {
        if calorie_intake > base_calorie_intake {
            Self::Gaining
        } else {
            Self::LosingOrMaintaining
        }
    }

    /// Adjustment that counters a stall in this phase
    #[must_use]
    pub const fn corrective_direction(&self) -> AdjustmentDirection {
        match self {
            Self::Gaining => AdjustmentDirection::Increase,
            Self::LosingOrMaintaining => AdjustmentDirection::Decrease,
        }
    }
}

/// Direction of a proposed calorie adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDirection {
    /// Raise the daily target
    Increase,
    /// Lower the daily target
    Decrease,
}

impl AdjustmentDirection {
    /// Apply a positive step in this direction
    #[must_use]
    pub const fn apply(&self, intake: i64, step: i64) -> i64 {
        match self {
            Self::Increase => intake + step,
            Self::Decrease => intake - step,
        }
    }

    /// Storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }

    /// Parse the storage representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "increase" => Some(Self::Increase),
            "decrease" => Some(Self::Decrease),
            _ => None,
        }
    }
}

impl fmt::Display for AdjustmentDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution state of a stagnation event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StagnationStatus {
    /// Waiting for the user's decision
    Pending,
    /// Accepted; the adjustment was written to the profile
    Applied,
    /// Declined; the target was left untouched
    Declined,
    /// Replaced by a newer event or invalidated by a target change
    Superseded,
}

impl StagnationStatus {
    /// Storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Applied => "applied",
            Self::Declined => "declined",
            Self::Superseded => "superseded",
        }
    }

    /// Parse the storage representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "applied" => Some(Self::Applied),
            "declined" => Some(Self::Declined),
            "superseded" => Some(Self::Superseded),
            _ => None,
        }
    }
}

impl fmt::Display for StagnationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected two-week weight stall awaiting confirmation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StagnationEvent {
    /// Event key used by the confirmation call
    pub id: Uuid,
    /// Owning profile
    pub profile_id: Uuid,
    /// Proposed adjustment direction
    pub direction: AdjustmentDirection,
    /// Number of check-ins recorded when the stall was detected
    pub checkin_count: usize,
    /// Newest sample (kg)
    pub latest_weight: f64,
    /// Sample two weeks back (kg)
    pub anchor_weight: f64,
    /// Daily target at detection time
    pub baseline_intake: i64,
    /// Daily target if the adjustment is accepted
    pub proposed_intake: i64,
    /// Resolution state
    pub status: StagnationStatus,
    /// Detection timestamp
    pub detected_at: DateTime<Utc>,
    /// Resolution timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl StagnationEvent {
    /// True once the event left the pending state
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status != StagnationStatus::Pending
    }

    /// Move the event to a terminal status
    pub fn resolve(&mut self, status: StagnationStatus) {
        self.status = status;
        self.resolved_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_phase_from_intakes() {
        assert_eq!(GoalPhase::from_intakes(3000, 2600), GoalPhase::Gaining);
        assert_eq!(
            GoalPhase::from_intakes(2600, 2600),
            GoalPhase::LosingOrMaintaining
        );
        assert_eq!(
            GoalPhase::from_intakes(1725, 2940),
            GoalPhase::LosingOrMaintaining
        );
    }

    #[test]
    fn test_direction_apply() {
        assert_eq!(AdjustmentDirection::Increase.apply(4395, 200), 4595);
        assert_eq!(AdjustmentDirection::Decrease.apply(1725, 200), 1525);
    }

    #[test]
    fn test_status_round_trips_through_storage_names() {
        for status in [
            StagnationStatus::Pending,
            StagnationStatus::Applied,
            StagnationStatus::Declined,
            StagnationStatus::Superseded,
        ] {
            assert_eq!(StagnationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(StagnationStatus::parse("unknown"), None);
    }
}
