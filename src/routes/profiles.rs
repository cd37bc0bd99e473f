// ABOUTME: Route handlers for the profile REST API
// ABOUTME: Profile creation, calorie computations, check-ins and stagnation confirmation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Profile routes
//!
//! Thin handlers: parse the path and body, delegate to
//! [`ProfileService`](crate::services::ProfileService) and wrap the result.
//! Malformed ids and bodies are reported through the usual error envelope.

use crate::errors::AppError;
use crate::models::{NewProfile, StagnationEvent};
use crate::resources::ServerResources;
use crate::services::WeightUnit;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Body of `POST /api/profiles/:id/daily-target`
#[derive(Debug, Deserialize)]
pub struct DailyTargetRequest {
    /// Timeframe to reach the goal weight
    pub days: i64,
}

/// Body of `POST /api/profiles/:id/check-ins`
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    /// Measured weight
    pub weight: f64,
    /// Unit of `weight` (kg when omitted)
    #[serde(default)]
    pub unit: WeightUnit,
}

/// Body of `POST /api/profiles/:id/stagnation-events/:event_id/confirm`
#[derive(Debug, Deserialize)]
pub struct ConfirmAdjustmentRequest {
    /// Apply the proposed adjustment when true, decline it otherwise
    pub accept: bool,
}

/// Response of `POST /api/profiles/:id/bmr`
#[derive(Debug, Serialize, Deserialize)]
pub struct BmrResponse {
    /// Basal metabolic rate (kcal/day)
    pub bmr: i64,
}

/// Response of `POST /api/profiles/:id/tdee`
#[derive(Debug, Serialize, Deserialize)]
pub struct TdeeResponse {
    /// Maintenance intake (kcal/day)
    pub base_calorie_intake: i64,
}

/// Response of `GET /api/profiles/:id/stagnation-events`
#[derive(Debug, Serialize)]
pub struct StagnationEventsResponse {
    /// Events, newest first
    pub events: Vec<StagnationEvent>,
}

/// Profile routes implementation
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profiles", post(Self::handle_create))
            .route("/api/profiles/:id", get(Self::handle_get))
            .route("/api/profiles/:id/bmr", post(Self::handle_bmr))
            .route("/api/profiles/:id/tdee", post(Self::handle_tdee))
            .route(
                "/api/profiles/:id/daily-target",
                post(Self::handle_daily_target),
            )
            .route("/api/profiles/:id/check-ins", post(Self::handle_checkin))
            .route(
                "/api/profiles/:id/stagnation-events",
                get(Self::handle_list_events),
            )
            .route(
                "/api/profiles/:id/stagnation-events/:event_id/confirm",
                post(Self::handle_confirm),
            )
            .with_state(resources)
    }

    fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw).map_err(|_| AppError::invalid_input(format!("Invalid {what} id: {raw}")))
    }

    fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
        payload
            .map(|Json(body)| body)
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
    }

    /// Handle POST /api/profiles - Create a profile
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<NewProfile>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = Self::parse_body(payload)?;
        let profile = resources.profiles.create_profile(request).await?;
        Ok((StatusCode::CREATED, Json(profile)).into_response())
    }

    /// Handle GET /api/profiles/:id - Read a profile
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = Self::parse_id(&id, "profile")?;
        let profile = resources.profiles.get_profile(id).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle POST /api/profiles/:id/bmr - Compute the basal metabolic rate
    async fn handle_bmr(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = Self::parse_id(&id, "profile")?;
        let bmr = resources.profiles.compute_bmr(id).await?;
        Ok((StatusCode::OK, Json(BmrResponse { bmr })).into_response())
    }

    /// Handle POST /api/profiles/:id/tdee - Compute the maintenance intake
    async fn handle_tdee(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = Self::parse_id(&id, "profile")?;
        let base_calorie_intake = resources.profiles.compute_tdee(id).await?;
        Ok((StatusCode::OK, Json(TdeeResponse { base_calorie_intake })).into_response())
    }

    /// Handle POST /api/profiles/:id/daily-target - Set the daily calorie target
    async fn handle_daily_target(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        payload: Result<Json<DailyTargetRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = Self::parse_id(&id, "profile")?;
        let request = Self::parse_body(payload)?;
        let result = resources
            .profiles
            .compute_daily_target(id, request.days)
            .await?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }

    /// Handle POST /api/profiles/:id/check-ins - Record a daily weight
    async fn handle_checkin(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        payload: Result<Json<CheckInRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = Self::parse_id(&id, "profile")?;
        let request = Self::parse_body(payload)?;
        let result = resources
            .profiles
            .record_checkin(id, request.weight, request.unit)
            .await?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }

    /// Handle GET /api/profiles/:id/stagnation-events - List adjustment proposals
    async fn handle_list_events(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = Self::parse_id(&id, "profile")?;
        let events = resources.profiles.list_stagnation_events(id).await?;
        Ok((StatusCode::OK, Json(StagnationEventsResponse { events })).into_response())
    }

    /// Handle POST /api/profiles/:id/stagnation-events/:event_id/confirm - Resolve a proposal
    async fn handle_confirm(
        State(resources): State<Arc<ServerResources>>,
        Path((id, event_id)): Path<(String, String)>,
        payload: Result<Json<ConfirmAdjustmentRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = Self::parse_id(&id, "profile")?;
        let event_id = Self::parse_id(&event_id, "stagnation event")?;
        let request = Self::parse_body(payload)?;
        let result = resources
            .profiles
            .confirm_adjustment(id, event_id, request.accept)
            .await?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }
}
