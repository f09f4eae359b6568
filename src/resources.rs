// ABOUTME: Shared server resource container passed to every route handler
// ABOUTME: Initialized once at startup, cloned as Arc into router state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;

/// Container for shared server dependencies
pub struct ServerResources {
    /// Database connection and managers entry point
    pub database: Arc<Database>,
    /// Session token issuing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle the shared dependencies
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let auth_manager = AuthManager::new(
            config.jwt_secret.as_bytes(),
            config.token_expiry_hours,
        );
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config: Arc::new(config),
        }
    }
}
