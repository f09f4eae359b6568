// ABOUTME: Achievement endpoints: list with live progress, re-check, claim experience
// ABOUTME: Mirrors the quest surface with a flat experience reward
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::database::achievements::AchievementsManager;
use crate::engine::{AchievementStatus, ProgressTracker};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::routes::authenticate;

/// Response for the achievement list
#[derive(Debug, Serialize)]
pub struct AchievementListResponse {
    /// All achievements with live progress
    pub achievements: Vec<AchievementStatus>,
}

/// Response for a check call
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// IDs that flipped to completed in this call
    pub newly_completed: Vec<i64>,
}

/// Response for a successful claim
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    /// Experience granted
    pub experience: i64,
}

/// Achievement route handlers
pub struct AchievementRoutes;

impl AchievementRoutes {
    /// Build the achievement router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/achievements", get(list_achievements))
            .route("/api/achievements/check", post(check_achievements))
            .route("/api/achievements/:id/claim", post(claim_achievement))
            .with_state(resources)
    }
}

async fn list_achievements(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;
    let tracker = ProgressTracker::new(resources.database.clone());
    let achievements = tracker.list_achievements(user_id).await?;
    Ok(Json(AchievementListResponse { achievements }).into_response())
}

async fn check_achievements(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;
    let tracker = ProgressTracker::new(resources.database.clone());
    let newly_completed = tracker.check_achievements(user_id).await?;
    Ok(Json(CheckResponse { newly_completed }).into_response())
}

async fn claim_achievement(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Path(achievement_id): Path<i64>,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;

    let achievements = AchievementsManager::new(resources.database.pool().clone());
    let def = achievements
        .get_achievement(achievement_id)
        .await?
        .ok_or_else(|| AppError::not_found("Achievement"))?;

    let experience = achievements.claim_achievement(user_id, &def).await?;
    Ok(Json(ClaimResponse { experience }).into_response())
}
