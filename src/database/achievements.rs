// ABOUTME: Achievement catalog reads, progress rows and experience-reward claims
// ABOUTME: Same claim guard as quests; achievements never repeat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::constants::messages;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{AchievementCondition, AchievementDefinition, UserAchievementProgress};

use super::users::parse_datetime;

/// Achievement database operations manager
pub struct AchievementsManager {
    pool: SqlitePool,
}

impl AchievementsManager {
    /// Create a new achievements manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The full achievement catalog
    pub async fn load_catalog(&self) -> AppResult<Vec<AchievementDefinition>> {
        let rows = sqlx::query("SELECT * FROM achievements ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load achievement catalog: {e}")))?;

        rows.iter().map(row_to_achievement).collect()
    }

    /// Get one achievement definition by ID
    pub async fn get_achievement(&self, id: i64) -> AppResult<Option<AchievementDefinition>> {
        let row = sqlx::query("SELECT * FROM achievements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get achievement: {e}")))?;

        row.as_ref().map(row_to_achievement).transpose()
    }

    /// All achievement progress rows for a user, keyed by achievement ID
    pub async fn achievement_progress(
        &self,
        user_id: Uuid,
    ) -> AppResult<HashMap<i64, UserAchievementProgress>> {
        let rows = sqlx::query("SELECT * FROM user_achievements WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load achievement progress: {e}")))?;

        rows.iter()
            .map(|r| {
                let progress = row_to_progress(r)?;
                Ok((progress.achievement_id, progress))
            })
            .collect()
    }

    /// Mark an achievement completed; keeps the first completion time
    pub async fn mark_completed(
        &self,
        user_id: Uuid,
        achievement_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_achievements (user_id, achievement_id, completed_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, achievement_id)
            DO UPDATE SET
                completed_at = COALESCE(user_achievements.completed_at, excluded.completed_at)
            ",
        )
        .bind(user_id.to_string())
        .bind(achievement_id)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to mark achievement completed: {e}")))?;

        Ok(())
    }

    /// Claim the experience reward for a completed achievement.
    ///
    /// Same transactional guard as quest claims; achievements never reset,
    /// so a successful claim is terminal.
    pub async fn claim_achievement(
        &self,
        user_id: Uuid,
        def: &AchievementDefinition,
    ) -> AppResult<i64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let row = sqlx::query(
            r"
            SELECT completed_at FROM user_achievements
            WHERE user_id = $1 AND achievement_id = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(def.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to read achievement progress: {e}")))?;

        // No row at all means the achievement was never progressed: missing
        // resource, not a gameplay conflict
        let row = row
            .ok_or_else(|| AppError::not_found("Achievement progress").with_user_id(user_id))?;
        if row.get::<Option<String>, _>("completed_at").is_none() {
            return Err(AppError::new(
                ErrorCode::QuestNotCompleted,
                messages::QUEST_NOT_COMPLETED,
            )
            .with_user_id(user_id));
        }

        let updated = sqlx::query(
            r"
            UPDATE user_achievements
            SET claimed_at = $1
            WHERE user_id = $2 AND achievement_id = $3
              AND completed_at IS NOT NULL AND claimed_at IS NULL
            ",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(user_id.to_string())
        .bind(def.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to claim achievement: {e}")))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::new(
                ErrorCode::RewardAlreadyClaimed,
                messages::REWARD_ALREADY_CLAIMED,
            )
            .with_user_id(user_id));
        }

        sqlx::query("UPDATE users SET experience = experience + $1 WHERE id = $2")
            .bind(def.reward)
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to grant experience: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit claim: {e}")))?;

        tracing::info!(
            user_id = %user_id,
            achievement_id = def.id,
            experience = def.reward,
            "Achievement reward claimed"
        );

        Ok(def.reward)
    }
}

fn row_to_achievement(row: &SqliteRow) -> AppResult<AchievementDefinition> {
    let condition_type_str: String = row.get("condition_type");

    Ok(AchievementDefinition {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        category: row.get("category"),
        condition_type: AchievementCondition::parse(&condition_type_str),
        condition_value: row.get("condition_value"),
        reward: row.get("reward"),
        icon: row.get("icon"),
    })
}

fn row_to_progress(row: &SqliteRow) -> AppResult<UserAchievementProgress> {
    let user_id_str: String = row.get("user_id");
    let completed_at: Option<String> = row.get("completed_at");
    let claimed_at: Option<String> = row.get("claimed_at");

    Ok(UserAchievementProgress {
        user_id: Uuid::parse_str(&user_id_str)
            .map_err(|e| AppError::database(format!("Invalid UUID: {e}")))?,
        achievement_id: row.get("achievement_id"),
        completed_at: completed_at.as_deref().map(parse_datetime).transpose()?,
        claimed_at: claimed_at.as_deref().map(parse_datetime).transpose()?,
    })
}
