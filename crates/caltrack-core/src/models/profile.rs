// ABOUTME: Body-metrics profile model with derived calorie fields and the weight check-in log
// ABOUTME: Profile, NewProfile, Sex, ActivityLevel and the append-only WeightLog definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{limits, UNSET_CALORIES};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Biological sex used for the BMR offset and the advisory threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male (+5 offset, 1500 kcal advisory minimum)
    Male,
    /// Female (-161 offset, 1200 kcal advisory minimum)
    Female,
}

impl Sex {
    /// Parse from stored text; anything other than `male` is treated as female
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("male") {
            Self::Male
        } else {
            Self::Female
        }
    }

    /// Storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity level selecting the TDEE multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (little/no exercise)
    NoActive,
    /// Light exercise 1-3 days/week
    LightActive,
    /// Moderate exercise 3-5 days/week
    ModerateActive,
    /// Hard exercise 6-7 days/week
    HighActive,
    /// Hard exercise or physical labor every day
    ExtraActive,
}

impl ActivityLevel {
    /// Every level, ordered by increasing multiplier
    pub const ALL: [Self; 5] = [
        Self::NoActive,
        Self::LightActive,
        Self::ModerateActive,
        Self::HighActive,
        Self::ExtraActive,
    ];

    /// Parse the storage/wire name, returning `None` for unknown values
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "no_active" => Some(Self::NoActive),
            "light_active" => Some(Self::LightActive),
            "moderate_active" => Some(Self::ModerateActive),
            "high_active" => Some(Self::HighActive),
            "extra_active" => Some(Self::ExtraActive),
            _ => None,
        }
    }

    /// Storage/wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoActive => "no_active",
            Self::LightActive => "light_active",
            Self::ModerateActive => "moderate_active",
            Self::HighActive => "high_active",
            Self::ExtraActive => "extra_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chronological log of daily weight samples in kilograms
///
/// The log only grows: samples can be appended and read, never edited or
/// removed. Every append marks the log dirty so the store knows the
/// serialized column must be rewritten on the next save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct WeightLog {
    samples: Vec<f64>,
    dirty: bool,
}

impl WeightLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap samples loaded from storage (clean)
    #[must_use]
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self {
            samples,
            dirty: false,
        }
    }

    /// Decode the JSON array persisted by the store
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the column is not a JSON array of numbers
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let samples: Vec<f64> = serde_json::from_str(raw)?;
        Ok(Self::from_samples(samples))
    }

    /// Encode as the JSON array persisted by the store
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(&self.samples)?)
    }

    /// Append a sample and mark the log dirty
    pub fn push(&mut self, weight_kg: f64) {
        self.samples.push(weight_kg);
        self.dirty = true;
    }

    /// Number of samples recorded
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no sample has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at a chronological index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.samples.get(index).copied()
    }

    /// Most recent sample
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.samples.last().copied()
    }

    /// All samples, oldest first
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Whether the log changed since it was loaded or last persisted
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after the store has written the log
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl From<Vec<f64>> for WeightLog {
    fn from(samples: Vec<f64>) -> Self {
        Self::from_samples(samples)
    }
}

impl From<WeightLog> for Vec<f64> {
    fn from(log: WeightLog) -> Self {
        log.samples
    }
}

/// A user's body metrics and derived calorie figures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Primary key
    pub id: Uuid,
    /// Current body weight (kg)
    pub weight: f64,
    /// Height (cm)
    pub height: f64,
    /// Age (years)
    pub age: u32,
    /// Goal weight (kg)
    pub target_weight: f64,
    /// Biological sex
    pub sex: Sex,
    /// Raw activity level as stored; see [`Profile::activity_level`]
    pub activity_level: String,
    /// Last computed basal metabolic rate, `-1` while unset
    pub bmr: i64,
    /// Maintenance intake derived from `bmr`, `-1` while unset
    pub base_calorie_intake: i64,
    /// Active daily calorie target, `-1` while unset
    pub calorie_intake: i64,
    /// Daily weight check-ins (kg), oldest first
    pub weight_check: WeightLog,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last save timestamp
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Build a fresh profile from a validated creation request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any metric fails validation
    pub fn create(request: NewProfile) -> AppResult<Self> {
        request.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            weight: request.weight,
            height: request.height,
            age: request.age,
            target_weight: request.target_weight,
            sex: request.sex,
            activity_level: request.activity_level.trim().to_owned(),
            bmr: UNSET_CALORIES,
            base_calorie_intake: UNSET_CALORIES,
            calorie_intake: UNSET_CALORIES,
            // Each profile owns its own log instance
            weight_check: WeightLog::from_samples(request.weight_check),
            created_at: now,
            updated_at: now,
        })
    }

    /// Resolve the stored activity level
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the stored value matches no known multiplier
    pub fn activity_level(&self) -> AppResult<ActivityLevel> {
        ActivityLevel::parse(&self.activity_level).ok_or_else(|| {
            AppError::invalid_state(format!(
                "activity level '{}' does not match any known multiplier",
                self.activity_level
            ))
        })
    }

    /// True once BMR has been computed
    #[must_use]
    pub const fn has_bmr(&self) -> bool {
        self.bmr >= 1
    }

    /// True once the maintenance intake has been computed
    #[must_use]
    pub const fn has_base_intake(&self) -> bool {
        self.base_calorie_intake >= 1
    }

    /// True once a daily target has been assigned
    #[must_use]
    pub const fn has_calorie_target(&self) -> bool {
        self.calorie_intake >= 1
    }
}

/// Request payload for creating a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    /// Current body weight (kg)
    pub weight: f64,
    /// Height (cm)
    pub height: f64,
    /// Age (years)
    pub age: u32,
    /// Goal weight (kg)
    pub target_weight: f64,
    /// Biological sex
    pub sex: Sex,
    /// One of `no_active`, `light_active`, `moderate_active`, `high_active`, `extra_active`
    pub activity_level: String,
    /// Optional check-in history imported with the profile (kg, oldest first)
    #[serde(default)]
    pub weight_check: Vec<f64>,
}

impl NewProfile {
    /// Validate every metric
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` describing the first offending field
    pub fn validate(&self) -> AppResult<()> {
        validate_weight_kg("weight", self.weight)?;
        validate_weight_kg("target_weight", self.target_weight)?;

        if !self.height.is_finite() || self.height <= 0.0 || self.height > limits::MAX_HEIGHT_CM {
            return Err(AppError::invalid_input(format!(
                "height must be between 0 and {} cm",
                limits::MAX_HEIGHT_CM
            )));
        }
        if self.age == 0 || self.age > limits::MAX_AGE_YEARS {
            return Err(AppError::invalid_input(format!(
                "age must be between 1 and {} years",
                limits::MAX_AGE_YEARS
            )));
        }
        if ActivityLevel::parse(&self.activity_level).is_none() {
            return Err(AppError::invalid_input(format!(
                "unknown activity level '{}'",
                self.activity_level
            )));
        }
        for sample in &self.weight_check {
            validate_weight_kg("weight_check sample", *sample)?;
        }
        Ok(())
    }
}

/// Check that a body weight is a positive, finite, plausible number of kilograms
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` otherwise
pub fn validate_weight_kg(field: &str, weight_kg: f64) -> AppResult<()> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 || weight_kg > limits::MAX_WEIGHT_KG {
        return Err(AppError::invalid_input(format!(
            "{field} must be between 0 and {} kg",
            limits::MAX_WEIGHT_KG
        )));
    }
    Ok(())
}
