// ABOUTME: Challenge endpoint tests: stage listing, sequencing and validation
// ABOUTME: Stages unlock one at a time; earlier stages may be re-run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use axum::http::StatusCode;
use axum::Router;
use serde_json::json;
use std::sync::Arc;

use fitpet_server::engine::ProgressTracker;
use fitpet_server::resources::ServerResources;
use fitpet_server::routes;
use helpers::axum_test::AxumTestRequest;

const RUN_3KM_15MIN: i64 = 15;

async fn setup() -> (Router, Arc<ServerResources>, String, uuid::Uuid) {
    let db = common::test_db().await;
    let user = common::create_test_user(&db).await;
    let resources = common::test_resources(db);
    let token = common::token_for(&resources, &user);
    let app = routes::router(resources.clone());
    (app, resources, token, user.id)
}

async fn complete_stage(app: &Router, token: &str, stage: i64) -> (StatusCode, serde_json::Value) {
    let response = AxumTestRequest::post("/api/challenges/complete")
        .bearer(token)
        .json(&json!({ "stage": stage }))
        .send(app.clone())
        .await;
    (response.status(), response.json())
}

#[tokio::test]
async fn test_initial_stage_list() {
    let (app, _, token, _) = setup().await;

    let response = AxumTestRequest::get("/api/challenges")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.json();
    assert_eq!(body["highest_stage"], 0);
    let stages = body["stages"].as_array().unwrap();
    assert_eq!(stages.len(), 6);
    assert_eq!(stages[0]["unlocked"], true);
    assert_eq!(stages[0]["completed"], false);
    assert_eq!(stages[1]["unlocked"], false);
}

#[tokio::test]
async fn test_skipping_a_stage_is_rejected() {
    let (app, _, token, _) = setup().await;

    let (status, body) = complete_stage(&app, &token, 3).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "STAGE_SKIPPED");
    assert_eq!(body["error"]["message"], "이전 단계를 먼저 완료해주세요");
}

#[tokio::test]
async fn test_stage_out_of_range_is_rejected() {
    let (app, _, token, _) = setup().await;

    for stage in [0, 7, -1] {
        let (status, body) = complete_stage(&app, &token, stage).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALUE_OUT_OF_RANGE");
    }
}

#[tokio::test]
async fn test_sequential_completion_and_reruns() {
    let (app, _, token, _) = setup().await;

    let (status, body) = complete_stage(&app, &token, 1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["highest_stage"], 1);

    // Stage 2 is now unlocked
    let (status, body) = complete_stage(&app, &token, 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["highest_stage"], 2);

    // Re-running stage 1 is allowed and keeps the high-water mark
    let (status, body) = complete_stage(&app, &token, 1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["highest_stage"], 2);

    // Stage 4 is still out of reach
    let (status, _) = complete_stage(&app, &token, 4).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = AxumTestRequest::get("/api/challenges")
        .bearer(&token)
        .send(app)
        .await;
    let body = response.json();
    let stages = body["stages"].as_array().unwrap();
    assert_eq!(stages[0]["completed"], true);
    assert_eq!(stages[1]["completed"], true);
    assert_eq!(stages[2]["unlocked"], true);
    assert_eq!(stages[2]["completed"], false);
}

#[tokio::test]
async fn test_stage_completion_unlocks_running_quest() {
    let (app, resources, token, user_id) = setup().await;

    let (status, _) = complete_stage(&app, &token, 1).await;
    assert_eq!(status, StatusCode::OK);

    let tracker = ProgressTracker::new(resources.database.clone());
    let newly = tracker.check_quests(user_id).await.unwrap();
    assert!(newly.contains(&RUN_3KM_15MIN));
}
