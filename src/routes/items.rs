// ABOUTME: Inventory endpoint returning the merged item view
// ABOUTME: Covers every catalog item, owned or not
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

use crate::database::inventory::InventoryManager;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::routes::authenticate;

/// Item route handlers
pub struct ItemRoutes;

impl ItemRoutes {
    /// Build the item router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/items", get(list_items))
            .with_state(resources)
    }
}

async fn list_items(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_id = authenticate(&headers, &resources)?;

    let inventory = InventoryManager::new(resources.database.pool().clone());
    let view = inventory.get_inventory(user_id).await?;

    Ok(Json(view).into_response())
}
