// ABOUTME: User account and pet profile database operations
// ABOUTME: Account creation, lookup and last-active tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::User;

/// User account database operations manager
pub struct UsersManager {
    pool: SqlitePool,
}

impl UsersManager {
    /// Create a new users manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user account
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (
                id, email, password_hash, display_name,
                strength, agility, stamina, concentration, experience,
                active_background, created_at, last_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.display_name)
        .bind(user.strength)
        .bind(user.agility)
        .bind(user.stamina)
        .bind(user.concentration)
        .bind(user.experience)
        .bind(&user.active_background)
        .bind(user.created_at.to_rfc3339())
        .bind(user.last_active.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        Ok(user.id)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Get a user by login email
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Record request activity for a user
    pub async fn touch_last_active(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_active = $1 WHERE id = $2")
            .bind(Utc::now().to_rfc3339())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update last_active: {e}")))?;

        Ok(())
    }

    pub(crate) fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");
        let last_active_str: String = row.get("last_active");

        Ok(User {
            id: Uuid::parse_str(&id_str)
                .map_err(|e| AppError::database(format!("Invalid UUID: {e}")))?,
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            display_name: row.get("display_name"),
            strength: row.get("strength"),
            agility: row.get("agility"),
            stamina: row.get("stamina"),
            concentration: row.get("concentration"),
            experience: row.get("experience"),
            active_background: row.get("active_background"),
            created_at: parse_datetime(&created_at_str)?,
            last_active: parse_datetime(&last_active_str)?,
        })
    }
}

pub(crate) fn parse_datetime(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid date: {e}")))
}
