// ABOUTME: HTTP integration tests for the profile and health routes
// ABOUTME: Drives the full router in-process and checks status codes, bodies and the error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use axum::Router;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

async fn create_profile(app: &Router, body: &Value) -> String {
    let created: Value = AxumTestRequest::post("/api/profiles")
        .json(body)
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    created["id"].as_str().unwrap().to_owned()
}

fn male_body_with_history() -> Value {
    let mut body = serde_json::to_value(common::male_profile_request()).unwrap();
    body["weight_check"] = json!(common::male_stalled_history());
    body
}

async fn post_ok(app: &Router, uri: &str, body: &Value) -> Value {
    AxumTestRequest::post(uri)
        .json(body)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json()
}

fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["error"]["code"], code, "unexpected error body: {body}");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = common::create_test_router().await.unwrap();

    let health: Value = AxumTestRequest::get("/health")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "caltrack-server");

    let ready: Value = AxumTestRequest::get("/ready")
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(ready["status"], "ready");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = common::create_test_router().await.unwrap();

    let generated = AxumTestRequest::get("/health").send(app.clone()).await;
    assert!(generated.header("x-request-id").is_some());

    let echoed = AxumTestRequest::get("/health")
        .header("x-request-id", "checkin-trace-42")
        .send(app)
        .await;
    assert_eq!(
        echoed.header("x-request-id").as_deref(),
        Some("checkin-trace-42")
    );
}

#[tokio::test]
async fn test_create_and_read_profile() {
    let app = common::create_test_router().await.unwrap();
    let id = create_profile(&app, &json!(common::female_profile_request())).await;

    let profile: Value = AxumTestRequest::get(&format!("/api/profiles/{id}"))
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(profile["id"], id);
    assert_eq!(profile["sex"], "female");
    assert_eq!(profile["activity_level"], "extra_active");
    assert_eq!(profile["bmr"], -1);
    assert_eq!(profile["base_calorie_intake"], -1);
    assert_eq!(profile["calorie_intake"], -1);
    assert_eq!(profile["weight_check"], json!([]));
}

#[tokio::test]
async fn test_create_profile_validation() {
    let app = common::create_test_router().await.unwrap();

    let mut bad_level = json!(common::male_profile_request());
    bad_level["activity_level"] = json!("couch");
    let mut bad_weight = json!(common::male_profile_request());
    bad_weight["weight"] = json!(-5.0);
    let mut bad_sex = json!(common::male_profile_request());
    bad_sex["sex"] = json!("robot");

    for body in [bad_level, bad_weight, bad_sex] {
        let error: Value = AxumTestRequest::post("/api/profiles")
            .json(&body)
            .send(app.clone())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_error(&error, "INVALID_INPUT");
    }

    let error: Value = AxumTestRequest::post("/api/profiles")
        .raw_json("{\"weight\": ")
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_error(&error, "INVALID_INPUT");
}

#[tokio::test]
async fn test_calorie_pipeline_over_http() {
    let app = common::create_test_router().await.unwrap();
    let id = create_profile(&app, &json!(common::male_profile_request())).await;
    let base = format!("/api/profiles/{id}");

    let bmr = post_ok(&app, &format!("{base}/bmr"), &json!({})).await;
    assert_eq!(bmr, json!({ "bmr": 1898 }));

    let tdee = post_ok(&app, &format!("{base}/tdee"), &json!({})).await;
    assert_eq!(tdee, json!({ "base_calorie_intake": 2940 }));

    let target = post_ok(&app, &format!("{base}/daily-target"), &json!({ "days": 60 })).await;
    assert_eq!(target["calorie_intake"], 1725);
    assert_eq!(target["advisories"], json!([]));

    let aggressive =
        post_ok(&app, &format!("{base}/daily-target"), &json!({ "days": 30 })).await;
    assert_eq!(aggressive["calorie_intake"], 510);
    assert_eq!(
        aggressive["advisories"],
        json!(["absolute_floor", "below_male_minimum"])
    );
}

#[tokio::test]
async fn test_out_of_order_computation_is_conflict() {
    let app = common::create_test_router().await.unwrap();
    let id = create_profile(&app, &json!(common::male_profile_request())).await;

    let error: Value = AxumTestRequest::post(&format!("/api/profiles/{id}/tdee"))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CONFLICT)
        .json();
    assert_error(&error, "INVALID_STATE");

    let error: Value = AxumTestRequest::post(&format!("/api/profiles/{id}/daily-target"))
        .json(&json!({ "days": 60 }))
        .send(app)
        .await
        .assert_status(StatusCode::CONFLICT)
        .json();
    assert_error(&error, "INVALID_STATE");
}

#[tokio::test]
async fn test_invalid_days_are_rejected() {
    let app = common::create_test_router().await.unwrap();
    let id = create_profile(&app, &json!(common::male_profile_request())).await;
    let base = format!("/api/profiles/{id}");
    post_ok(&app, &format!("{base}/bmr"), &json!({})).await;
    post_ok(&app, &format!("{base}/tdee"), &json!({})).await;

    for (body, code) in [
        (json!({ "days": 0 }), "INVALID_INPUT"),
        (json!({ "days": 100_000 }), "VALUE_OUT_OF_RANGE"),
        (json!({ "days": "sixty" }), "INVALID_INPUT"),
        (json!({}), "INVALID_INPUT"),
    ] {
        let error: Value = AxumTestRequest::post(&format!("{base}/daily-target"))
            .json(&body)
            .send(app.clone())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_error(&error, code);
    }
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = common::create_test_router().await.unwrap();
    let missing = uuid::Uuid::new_v4();

    let error: Value = AxumTestRequest::get(&format!("/api/profiles/{missing}"))
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_error(&error, "RESOURCE_NOT_FOUND");

    let error: Value = AxumTestRequest::post(&format!("/api/profiles/{missing}/bmr"))
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_error(&error, "RESOURCE_NOT_FOUND");

    let error: Value = AxumTestRequest::get("/api/profiles/not-a-uuid")
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_error(&error, "INVALID_INPUT");
}

#[tokio::test]
async fn test_checkin_proposal_and_confirmation() {
    let app = common::create_test_router().await.unwrap();
    let id = create_profile(&app, &male_body_with_history()).await;
    let base = format!("/api/profiles/{id}");
    post_ok(&app, &format!("{base}/bmr"), &json!({})).await;
    post_ok(&app, &format!("{base}/tdee"), &json!({})).await;
    post_ok(&app, &format!("{base}/daily-target"), &json!({ "days": 60 })).await;

    let checkin = post_ok(&app, &format!("{base}/check-ins"), &json!({ "weight": 91.0 })).await;
    assert_eq!(checkin["checkin_count"], 14);
    assert_eq!(checkin["calorie_intake"], 1725);
    let event = &checkin["stagnation_event"];
    assert_eq!(event["direction"], "decrease");
    assert_eq!(event["status"], "pending");
    assert_eq!(event["baseline_intake"], 1725);
    assert_eq!(event["proposed_intake"], 1525);
    let event_id = event["id"].as_str().unwrap().to_owned();

    let listed: Value = AxumTestRequest::get(&format!("{base}/stagnation-events"))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(listed["events"].as_array().unwrap().len(), 1);
    assert_eq!(listed["events"][0]["id"], event_id.as_str());

    let confirm_uri = format!("{base}/stagnation-events/{event_id}/confirm");
    let confirmed = post_ok(&app, &confirm_uri, &json!({ "accept": true })).await;
    assert_eq!(confirmed["calorie_intake"], 1525);
    assert_eq!(confirmed["event"]["status"], "applied");

    let repeated = post_ok(&app, &confirm_uri, &json!({ "accept": true })).await;
    assert_eq!(repeated["calorie_intake"], 1525);

    let profile: Value = AxumTestRequest::get(&base)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(profile["calorie_intake"], 1525);
    assert_eq!(profile["weight_check"].as_array().unwrap().len(), 14);
}

#[tokio::test]
async fn test_checkin_without_stall_omits_event() {
    let app = common::create_test_router().await.unwrap();
    let id = create_profile(&app, &json!(common::male_profile_request())).await;

    let checkin = post_ok(
        &app,
        &format!("/api/profiles/{id}/check-ins"),
        &json!({ "weight": 200.0, "unit": "lbs" }),
    )
    .await;
    assert_eq!(checkin["checkin_count"], 1);
    assert_eq!(checkin["calorie_intake"], -1);
    assert!(checkin.get("stagnation_event").is_none());

    let error: Value = AxumTestRequest::post(&format!("/api/profiles/{id}/check-ins"))
        .json(&json!({ "weight": 80.0, "unit": "stone" }))
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_error(&error, "INVALID_INPUT");
}

#[tokio::test]
async fn test_confirm_unknown_event_is_not_found() {
    let app = common::create_test_router().await.unwrap();
    let id = create_profile(&app, &json!(common::male_profile_request())).await;
    let event_id = uuid::Uuid::new_v4();

    let error: Value = AxumTestRequest::post(&format!(
        "/api/profiles/{id}/stagnation-events/{event_id}/confirm"
    ))
    .json(&json!({ "accept": true }))
    .send(app.clone())
    .await
    .assert_status(StatusCode::NOT_FOUND)
    .json();
    assert_error(&error, "RESOURCE_NOT_FOUND");

    let error: Value = AxumTestRequest::post(&format!(
        "/api/profiles/{id}/stagnation-events/bogus/confirm"
    ))
    .json(&json!({ "accept": true }))
    .send(app)
    .await
    .assert_status(StatusCode::BAD_REQUEST)
    .json();
    assert_error(&error, "INVALID_INPUT");
}
