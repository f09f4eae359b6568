// ABOUTME: Liveness probe endpoint, no authentication
// ABOUTME: Reports the crate version for deploy verification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Fixed "ok" status
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}

/// Health route handlers
pub struct HealthRoutes;

impl HealthRoutes {
    /// Build the health router
    #[must_use]
    pub fn routes() -> Router {
        Router::new().route("/api/health", get(health))
    }
}

async fn health() -> Response {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
    .into_response()
}
