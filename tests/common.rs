// ABOUTME: Shared test setup: in-memory database, users and session tokens
// ABOUTME: Keeps integration tests free of boilerplate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `fitpet-server` integration tests

use std::sync::Arc;
use uuid::Uuid;

use fitpet_server::auth::hash_password;
use fitpet_server::config::ServerConfig;
use fitpet_server::database::users::UsersManager;
use fitpet_server::database::Database;
use fitpet_server::models::User;
use fitpet_server::resources::ServerResources;

/// Fresh in-memory database with migrations run and catalogs seeded
pub async fn test_db() -> Database {
    Database::in_memory().await.unwrap()
}

/// Create a user directly in the database, bypassing the register endpoint
pub async fn create_test_user(db: &Database) -> User {
    create_test_user_with_email(db, &format!("user-{}@example.com", Uuid::new_v4())).await
}

/// Create a user with a specific email
pub async fn create_test_user_with_email(db: &Database, email: &str) -> User {
    let user = User::new(
        email.to_owned(),
        hash_password("test-password").unwrap(),
        Some("tester".to_owned()),
    );
    UsersManager::new(db.pool().clone())
        .create_user(&user)
        .await
        .unwrap();
    user
}

/// Bundle server resources around an existing database with a fixed secret
pub fn test_resources(db: Database) -> Arc<ServerResources> {
    let config = ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".to_owned(),
        jwt_secret: "integration-test-secret".to_owned(),
        token_expiry_hours: 24,
    };
    Arc::new(ServerResources::new(db, config))
}

/// Issue a session token for a user
pub fn token_for(resources: &ServerResources, user: &User) -> String {
    resources.auth_manager.generate_token(user).unwrap()
}
