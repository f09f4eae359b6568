// ABOUTME: HTTP route handlers for the REST API
// ABOUTME: Route structs own a ServerResources Arc; authentication is a shared helper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

//! # REST API routes
//!
//! Every gameplay route authenticates with a bearer session token via the
//! shared [`authenticate`] helper; handlers return `Result<Response,
//! AppError>` and the error type renders the JSON error envelope.

/// Workout and attendance recording
pub mod activity;
/// Achievement list, check and claim
pub mod achievements;
/// Registration and login
pub mod auth;
/// Challenge stage list and completion
pub mod challenges;
/// Liveness probe
pub mod health;
/// Inventory view
pub mod items;
/// Pet profile view
pub mod profile;
/// Quest list, check and claim
pub mod quests;

use axum::http::HeaderMap;
use axum::Router;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::extract_bearer;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// Authenticate a request from its Authorization header.
///
/// Returns the user ID from the session token. The user row is not loaded
/// here; handlers that need it fetch it themselves.
pub fn authenticate(headers: &HeaderMap, resources: &ServerResources) -> AppResult<Uuid> {
    let header_value = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    let token = extract_bearer(header_value)?;
    resources.auth_manager.user_id_from_token(token)
}

/// Compose the full API router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(health::HealthRoutes::routes())
        .merge(auth::AuthRoutes::routes(resources.clone()))
        .merge(profile::ProfileRoutes::routes(resources.clone()))
        .merge(activity::ActivityRoutes::routes(resources.clone()))
        .merge(quests::QuestRoutes::routes(resources.clone()))
        .merge(achievements::AchievementRoutes::routes(resources.clone()))
        .merge(challenges::ChallengeRoutes::routes(resources.clone()))
        .merge(items::ItemRoutes::routes(resources))
}
