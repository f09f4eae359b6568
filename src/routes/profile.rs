// ABOUTME: Pet profile endpoint: stats, derived level and evolution stage
// ABOUTME: Level is computed from stat totals on every read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::database::users::UsersManager;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::routes::authenticate;

/// Pet profile response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// User ID
    pub user_id: String,
    /// Login email
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Pet strength stat
    pub strength: i64,
    /// Pet agility stat
    pub agility: i64,
    /// Pet stamina stat
    pub stamina: i64,
    /// Pet concentration stat
    pub concentration: i64,
    /// Accumulated achievement experience
    pub experience: i64,
    /// Derived pet level
    pub level: i64,
    /// Derived evolution stage, 1 through 3
    pub evolution_stage: i64,
    /// Active home-screen background, if any
    pub active_background: Option<String>,
}

/// Profile route handlers
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Build the profile router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", get(get_profile))
            .with_state(resources)
    }
}

async fn get_profile(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;

    let users = UsersManager::new(resources.database.pool().clone());
    let user = users
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let response = ProfileResponse {
        user_id: user.id.to_string(),
        email: user.email.clone(),
        display_name: user.display_name.clone(),
        strength: user.strength,
        agility: user.agility,
        stamina: user.stamina,
        concentration: user.concentration,
        experience: user.experience,
        level: user.level(),
        evolution_stage: user.evolution_stage(),
        active_background: user.active_background.clone(),
    };

    Ok(Json(response).into_response())
}
