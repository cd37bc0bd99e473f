// ABOUTME: Profile business logic extracted from route handlers
// ABOUTME: Calorie computations, check-ins and the stagnation confirmation protocol per profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Profile service
//!
//! Every operation loads one profile, mutates it and persists it as a single
//! unit. Operations on the same profile id are serialised by a keyed async
//! mutex so concurrent requests cannot lose updates; different ids never
//! contend.

use crate::config::intelligence_config::NutritionConfig;
use crate::database::ProfileStore;
use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    calculate_base_intake, calculate_daily_target, calculate_mifflin_st_jeor, lbs_to_kg,
    record_checkin, warn_if_low, IntakeAdvisory,
};
use crate::logging::AppLogger;
use crate::models::{NewProfile, Profile, StagnationEvent, StagnationStatus};
use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

/// Unit of a submitted check-in weight
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Kilograms (stored as-is)
    #[default]
    Kg,
    /// Pounds (converted to kilograms before storage)
    Lbs,
}

/// Result of setting the daily target
#[derive(Debug, Clone, Serialize)]
pub struct DailyTargetResult {
    /// New daily calorie target
    pub calorie_intake: i64,
    /// Low-intake advisories raised for it
    pub advisories: Vec<IntakeAdvisory>,
}

/// Result of a daily check-in
#[derive(Debug, Clone, Serialize)]
pub struct CheckInResult {
    /// Active daily target (unchanged by the check-in itself)
    pub calorie_intake: i64,
    /// Length of the weight log after the append
    pub checkin_count: usize,
    /// Pending adjustment proposal, when stagnation was detected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagnation_event: Option<StagnationEvent>,
    /// Low-intake advisories raised for the proposed target
    pub advisories: Vec<IntakeAdvisory>,
}

/// Result of confirming or declining a proposed adjustment
#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentResult {
    /// Daily target after the confirmation
    pub calorie_intake: i64,
    /// Event in its resolved state
    pub event: StagnationEvent,
}

/// Exclusive hold on one profile id
///
/// Dropping it releases the mutex and evicts the map entry when no other
/// request holds or awaits it, so unknown ids leave nothing behind.
struct ProfileGuard<'a> {
    locks: &'a DashMap<Uuid, Arc<Mutex<()>>>,
    id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ProfileGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.remove_if(&self.id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Orchestrates profile operations against a [`ProfileStore`]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
    config: NutritionConfig,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl ProfileService {
    /// Create a service over `store` using `config` for every calculation
    #[must_use]
    pub fn new(store: Arc<dyn ProfileStore>, config: NutritionConfig) -> Self {
        Self {
            store,
            config,
            locks: DashMap::new(),
        }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &NutritionConfig {
        &self.config
    }

    /// Number of profile ids with a live lock entry
    #[must_use]
    pub fn active_profile_locks(&self) -> usize {
        self.locks.len()
    }

    async fn lock_profile(&self, id: Uuid) -> ProfileGuard<'_> {
        let lock = self.locks.entry(id).or_default().value().clone();
        let guard = lock.lock_owned().await;
        ProfileGuard {
            locks: &self.locks,
            id,
            guard: Some(guard),
        }
    }

    async fn load(&self, id: Uuid) -> AppResult<Profile> {
        self.store
            .get_profile(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile {id}")))
    }

    /// Create a profile with unset derived fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a metric fails validation, or a database error
    pub async fn create_profile(&self, request: NewProfile) -> AppResult<Profile> {
        let mut profile = Profile::create(request)?;
        self.store.create_profile(&mut profile).await?;
        info!(profile.id = %profile.id, "Profile created");
        Ok(profile)
    }

    /// Load a profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the id does not resolve
    pub async fn get_profile(&self, id: Uuid) -> AppResult<Profile> {
        self.load(id).await
    }

    /// Compute and persist the basal metabolic rate
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the id does not resolve
    pub async fn compute_bmr(&self, id: Uuid) -> AppResult<i64> {
        let _guard = self.lock_profile(id).await;

        let mut profile = self.load(id).await?;
        let bmr = calculate_mifflin_st_jeor(
            profile.weight,
            profile.height,
            profile.age,
            profile.sex,
            &self.config.bmr,
        )?;

        profile.bmr = bmr;
        self.store.save_profile(&mut profile).await?;
        AppLogger::log_calorie_computation(id, "bmr", bmr);
        Ok(bmr)
    }

    /// Compute and persist the maintenance intake
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the id does not resolve and `InvalidState` if
    /// BMR is unset or the stored activity level is unknown
    pub async fn compute_tdee(&self, id: Uuid) -> AppResult<i64> {
        let _guard = self.lock_profile(id).await;

        let mut profile = self.load(id).await?;
        if !profile.has_bmr() {
            return Err(AppError::invalid_state("bmr not yet computed"));
        }
        let level = profile.activity_level()?;
        let base = calculate_base_intake(
            profile.bmr,
            level,
            &self.config.activity_factors,
            self.config.goal_pacing.calorie_step,
        )?;

        profile.base_calorie_intake = base;
        self.store.save_profile(&mut profile).await?;
        AppLogger::log_calorie_computation(id, "tdee", base);
        Ok(base)
    }

    /// Compute and persist the daily target that reaches the goal weight in `days`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, `InvalidInput` for a non-positive timeframe, or
    /// `InvalidState` when the maintenance intake is unset
    pub async fn compute_daily_target(&self, id: Uuid, days: i64) -> AppResult<DailyTargetResult> {
        let _guard = self.lock_profile(id).await;

        let mut profile = self.load(id).await?;
        if !profile.has_base_intake() {
            return Err(AppError::invalid_state(
                "base calorie intake not yet computed",
            ));
        }
        let calorie_intake = calculate_daily_target(
            profile.weight,
            profile.target_weight,
            profile.base_calorie_intake,
            days,
            &self.config.goal_pacing,
        )?;
        let advisories = warn_if_low(calorie_intake, profile.sex, &self.config.intake_warnings);

        profile.calorie_intake = calorie_intake;
        self.store.save_profile(&mut profile).await?;
        AppLogger::log_calorie_computation(id, "daily_target", calorie_intake);
        Ok(DailyTargetResult {
            calorie_intake,
            advisories,
        })
    }

    /// Record a daily weight check-in and evaluate stagnation at weekly boundaries
    ///
    /// A detected stall is stored as a pending [`StagnationEvent`] (superseding
    /// older pending ones); the daily target does not change until it is confirmed.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `InvalidInput` for a non-positive weight
    pub async fn record_checkin(
        &self,
        id: Uuid,
        weight: f64,
        unit: WeightUnit,
    ) -> AppResult<CheckInResult> {
        let weight_kg = match unit {
            WeightUnit::Kg => weight,
            WeightUnit::Lbs => {
                if !weight.is_finite() || weight <= 0.0 {
                    return Err(AppError::invalid_input("weight must be positive"));
                }
                lbs_to_kg(weight, &self.config.goal_pacing)
            }
        };

        let _guard = self.lock_profile(id).await;

        let mut profile = self.load(id).await?;
        let outcome = record_checkin(&mut profile, weight_kg, &self.config)?;

        let stagnation_event = outcome.assessment.map(|assessment| StagnationEvent {
            id: Uuid::new_v4(),
            profile_id: id,
            direction: assessment.direction,
            checkin_count: outcome.checkin_count,
            latest_weight: assessment.latest_weight,
            anchor_weight: assessment.anchor_weight,
            baseline_intake: assessment.baseline_intake,
            proposed_intake: assessment.proposed_intake,
            status: StagnationStatus::Pending,
            detected_at: Utc::now(),
            resolved_at: None,
        });

        self.store
            .save_checkin(&mut profile, stagnation_event.as_ref())
            .await?;

        AppLogger::log_checkin(id, weight_kg, outcome.checkin_count, outcome.evaluated);
        if let Some(event) = &stagnation_event {
            AppLogger::log_stagnation_decision(id, event.id, event.direction, "proposed");
        }

        Ok(CheckInResult {
            calorie_intake: profile.calorie_intake,
            checkin_count: outcome.checkin_count,
            stagnation_event,
            advisories: outcome.advisories,
        })
    }

    /// Accept or decline a proposed adjustment
    ///
    /// Repeating the call for a resolved event returns it unchanged. Accepting
    /// applies the step only while the daily target still equals the value the
    /// proposal was computed from; otherwise the event is superseded.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the profile or event does not resolve (or the
    /// event belongs to another profile) and `InvalidState` if the target changed
    pub async fn confirm_adjustment(
        &self,
        id: Uuid,
        event_id: Uuid,
        accept: bool,
    ) -> AppResult<AdjustmentResult> {
        let _guard = self.lock_profile(id).await;

        let mut profile = self.load(id).await?;
        let mut event = self
            .store
            .get_stagnation_event(event_id)
            .await?
            .filter(|event| event.profile_id == id)
            .ok_or_else(|| AppError::not_found(format!("Stagnation event {event_id}")))?;

        if event.is_resolved() {
            debug!(
                profile.id = %id,
                stagnation.event_id = %event_id,
                stagnation.status = %event.status,
                "Stagnation event already resolved"
            );
            return Ok(AdjustmentResult {
                calorie_intake: profile.calorie_intake,
                event,
            });
        }

        if !accept {
            event.resolve(StagnationStatus::Declined);
            self.store.save_stagnation_event(&event).await?;
            AppLogger::log_stagnation_decision(id, event.id, event.direction, "declined");
            return Ok(AdjustmentResult {
                calorie_intake: profile.calorie_intake,
                event,
            });
        }

        if profile.calorie_intake != event.baseline_intake {
            event.resolve(StagnationStatus::Superseded);
            self.store.save_stagnation_event(&event).await?;
            AppLogger::log_stagnation_decision(id, event.id, event.direction, "superseded");
            return Err(AppError::invalid_state(format!(
                "daily target changed from {} to {} since the adjustment was proposed",
                event.baseline_intake, profile.calorie_intake
            )));
        }

        profile.calorie_intake = event.proposed_intake;
        event.resolve(StagnationStatus::Applied);
        self.store.save_resolution(&mut profile, &event).await?;
        AppLogger::log_stagnation_decision(id, event.id, event.direction, "applied");

        Ok(AdjustmentResult {
            calorie_intake: profile.calorie_intake,
            event,
        })
    }

    /// Stagnation events of a profile, newest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the id does not resolve
    pub async fn list_stagnation_events(&self, id: Uuid) -> AppResult<Vec<StagnationEvent>> {
        self.load(id).await?;
        self.store.list_stagnation_events(id).await
    }
}
