// ABOUTME: Registration and login endpoints issuing session tokens
// ABOUTME: Login failure is deliberately indistinct between bad email and bad password
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{hash_password, verify_password};
use crate::constants::{limits, messages};
use crate::database::users::UsersManager;
use crate::errors::{AppError, ErrorCode};
use crate::models::User;
use crate::resources::ServerResources;

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login email
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Optional display name
    pub display_name: Option<String>,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Successful registration or login response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Session token for the Authorization header
    pub token: String,
    /// User ID
    pub user_id: String,
    /// Login email
    pub email: String,
}

/// Registration and login route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Build the auth router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(register))
            .route("/api/auth/login", post(login))
            .with_state(resources)
    }
}

async fn register(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::invalid_input("Invalid email address"));
    }
    if request.password.len() < limits::MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Password must be at least {} characters",
            limits::MIN_PASSWORD_LENGTH
        )));
    }

    let users = UsersManager::new(resources.database.pool().clone());
    if users.get_user_by_email(&email).await?.is_some() {
        return Err(AppError::new(
            ErrorCode::ResourceAlreadyExists,
            messages::EMAIL_TAKEN,
        ));
    }

    let password_hash = hash_password(&request.password)?;
    let user = User::new(email, password_hash, request.display_name);
    users.create_user(&user).await?;

    tracing::info!(user_id = %user.id, "User registered");

    let token = resources.auth_manager.generate_token(&user)?;
    let response = SessionResponse {
        token,
        user_id: user.id.to_string(),
        email: user.email,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

async fn login(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let email = request.email.trim().to_lowercase();
    let users = UsersManager::new(resources.database.pool().clone());

    // Same error whether the email is unknown or the password is wrong
    let user = users
        .get_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::auth_invalid(messages::LOGIN_FAILED))?;

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(AppError::auth_invalid(messages::LOGIN_FAILED).with_user_id(user.id));
    }

    users.touch_last_active(user.id).await?;

    let token = resources.auth_manager.generate_token(&user)?;
    let response = SessionResponse {
        token,
        user_id: user.id.to_string(),
        email: user.email,
    };
    Ok(Json(response).into_response())
}
