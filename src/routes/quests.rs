// ABOUTME: Quest endpoints: list with live progress, re-check, claim reward
// ABOUTME: Claim delegates to the transactional guard in the database layer
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

use crate::database::quests::QuestsManager;
use crate::engine::{ProgressTracker, QuestStatus};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::routes::authenticate;

/// Response for the quest list
#[derive(Debug, Serialize)]
pub struct QuestListResponse {
    /// All quests with live progress, in display order
    pub quests: Vec<QuestStatus>,
}

/// Response for a check call
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// IDs that flipped to completed in this call
    pub newly_completed: Vec<i64>,
}

/// Quest route handlers
pub struct QuestRoutes;

impl QuestRoutes {
    /// Build the quest router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/quests", get(list_quests))
            .route("/api/quests/check", post(check_quests))
            .route("/api/quests/:id/claim", post(claim_quest))
            .with_state(resources)
    }
}

async fn list_quests(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;
    let tracker = ProgressTracker::new(resources.database.clone());
    let quests = tracker.list_quests(user_id).await?;
    Ok(Json(QuestListResponse { quests }).into_response())
}

async fn check_quests(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;
    let tracker = ProgressTracker::new(resources.database.clone());
    let newly_completed = tracker.check_quests(user_id).await?;
    Ok(Json(CheckResponse { newly_completed }).into_response())
}

async fn claim_quest(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Path(quest_id): Path<i64>,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;

    let quests = QuestsManager::new(resources.database.pool().clone());
    let def = quests
        .get_quest(quest_id)
        .await?
        .ok_or_else(|| AppError::not_found("Quest"))?;

    // The granted reward is the whole response body
    let reward = quests.claim_quest(user_id, &def).await?;
    Ok(Json(reward).into_response())
}
