// ABOUTME: Activity recording endpoints: workouts and daily attendance
// ABOUTME: Validates duration and workout type before touching the log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::constants::{limits, messages};
use crate::database::activity::ActivityManager;
use crate::errors::{AppError, ErrorCode};
use crate::models::WorkoutType;
use crate::resources::ServerResources;
use crate::routes::authenticate;

/// Workout recording request body
#[derive(Debug, Deserialize)]
pub struct WorkoutRequest {
    /// Workout category: aerobic, weight or interval
    pub workout_type: String,
    /// Session length in minutes
    pub duration_minutes: i64,
    /// Calendar day of the session; defaults to today
    pub workout_date: Option<NaiveDate>,
}

/// Response for a recorded workout
#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    /// Row ID of the new record
    pub id: i64,
}

/// Response for an attendance call
#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    /// Whether this call recorded a new attendance day
    pub recorded: bool,
}

/// Activity route handlers
pub struct ActivityRoutes;

impl ActivityRoutes {
    /// Build the activity router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", post(record_workout))
            .route("/api/attendance", post(record_attendance))
            .with_state(resources)
    }
}

async fn record_workout(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<WorkoutRequest>,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;

    if request.duration_minutes < 1 || request.duration_minutes > limits::MAX_WORKOUT_MINUTES {
        return Err(AppError::new(
            ErrorCode::ValueOutOfRange,
            messages::INVALID_DURATION,
        ));
    }
    let workout_type = WorkoutType::from_str(&request.workout_type)?;

    let activity = ActivityManager::new(resources.database.pool().clone());
    let date = request
        .workout_date
        .unwrap_or_else(ActivityManager::local_today);
    let id = activity
        .record_workout(user_id, workout_type, request.duration_minutes, date)
        .await?;

    tracing::debug!(
        user_id = %user_id,
        workout_type = workout_type.as_str(),
        duration_minutes = request.duration_minutes,
        "Workout recorded"
    );

    Ok((StatusCode::CREATED, Json(WorkoutResponse { id })).into_response())
}

async fn record_attendance(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;

    let activity = ActivityManager::new(resources.database.pool().clone());
    let recorded = activity
        .record_attendance(user_id, ActivityManager::local_today())
        .await?;

    Ok(Json(AttendanceResponse { recorded }).into_response())
}
