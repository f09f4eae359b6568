// ABOUTME: Running-challenge endpoints: stage list and sequential completion
// ABOUTME: A stage more than one past the high-water mark is rejected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::challenge_stages;
use crate::constants::{limits, messages};
use crate::database::activity::ActivityManager;
use crate::errors::{AppError, ErrorCode};
use crate::resources::ServerResources;
use crate::routes::authenticate;

/// One stage merged with the user's progress
#[derive(Debug, Serialize)]
pub struct StageStatus {
    /// Stage number, 1 through 6
    pub stage: i64,
    /// Display name
    pub name: String,
    /// Display description
    pub description: String,
    /// Whether the user has ever completed this stage
    pub completed: bool,
    /// Whether the user may attempt this stage now
    pub unlocked: bool,
}

/// Response for the stage list
#[derive(Debug, Serialize)]
pub struct ChallengeListResponse {
    /// All six stages with progress flags
    pub stages: Vec<StageStatus>,
    /// The user's high-water mark, 0 if none completed
    pub highest_stage: i64,
}

/// Completion request body
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    /// Stage being reported as completed
    pub stage: i64,
}

/// Response for a recorded completion
#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    /// Stage recorded
    pub stage: i64,
    /// High-water mark after this completion
    pub highest_stage: i64,
}

/// Challenge route handlers
pub struct ChallengeRoutes;

impl ChallengeRoutes {
    /// Build the challenge router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/challenges", get(list_challenges))
            .route("/api/challenges/complete", post(complete_stage))
            .with_state(resources)
    }
}

async fn list_challenges(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;

    let activity = ActivityManager::new(resources.database.pool().clone());
    let highest = activity.highest_stage(user_id).await?;

    let stages = challenge_stages()
        .iter()
        .map(|s| StageStatus {
            stage: s.stage,
            name: s.name.clone(),
            description: s.description.clone(),
            completed: s.stage <= highest,
            unlocked: s.stage <= highest + 1,
        })
        .collect();

    Ok(Json(ChallengeListResponse {
        stages,
        highest_stage: highest,
    })
    .into_response())
}

async fn complete_stage(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<CompleteRequest>,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;

    if !(limits::CHALLENGE_STAGE_MIN..=limits::CHALLENGE_STAGE_MAX).contains(&request.stage) {
        return Err(AppError::new(
            ErrorCode::ValueOutOfRange,
            messages::STAGE_OUT_OF_RANGE,
        ));
    }

    let activity = ActivityManager::new(resources.database.pool().clone());
    let highest = activity.highest_stage(user_id).await?;

    // Stages unlock one at a time; re-running an earlier stage is fine
    if request.stage > highest + 1 {
        return Err(
            AppError::new(ErrorCode::StageSkipped, messages::STAGE_SKIPPED).with_user_id(user_id),
        );
    }

    let new_highest = activity
        .record_challenge_completion(user_id, request.stage)
        .await?;

    tracing::info!(
        user_id = %user_id,
        stage = request.stage,
        highest_stage = new_highest,
        "Challenge stage completed"
    );

    Ok(Json(CompleteResponse {
        stage: request.stage,
        highest_stage: new_highest,
    })
    .into_response())
}
