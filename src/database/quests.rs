// ABOUTME: Quest catalog reads, per-user progress rows and the claim transaction
// ABOUTME: The claim guard enforces at-most-one reward per completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use crate::constants::messages;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{ClaimedReward, ConditionType, QuestDefinition, QuestType, RewardType, UserQuestProgress};

use super::inventory::apply_quest_reward;
use super::users::parse_datetime;

/// Quest database operations manager
pub struct QuestsManager {
    pool: SqlitePool,
}

impl QuestsManager {
    /// Create a new quests manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The full quest catalog in display order
    pub async fn load_catalog(&self) -> AppResult<Vec<QuestDefinition>> {
        let rows = sqlx::query("SELECT * FROM quests ORDER BY sort_order, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load quest catalog: {e}")))?;

        rows.iter().map(row_to_quest).collect()
    }

    /// Get one quest definition by ID
    pub async fn get_quest(&self, quest_id: i64) -> AppResult<Option<QuestDefinition>> {
        let row = sqlx::query("SELECT * FROM quests WHERE id = $1")
            .bind(quest_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get quest: {e}")))?;

        row.as_ref().map(row_to_quest).transpose()
    }

    /// All progress rows for a user, keyed by quest ID. Quests the user has
    /// never touched have no row.
    pub async fn quest_progress(&self, user_id: Uuid) -> AppResult<HashMap<i64, UserQuestProgress>> {
        let rows = sqlx::query("SELECT * FROM user_quest_progress WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load quest progress: {e}")))?;

        rows.iter()
            .map(|r| {
                let progress = row_to_progress(r)?;
                Ok((progress.quest_id, progress))
            })
            .collect()
    }

    /// One progress row, if it exists
    pub async fn get_progress(
        &self,
        user_id: Uuid,
        quest_id: i64,
    ) -> AppResult<Option<UserQuestProgress>> {
        let row = sqlx::query(
            "SELECT * FROM user_quest_progress WHERE user_id = $1 AND quest_id = $2",
        )
        .bind(user_id.to_string())
        .bind(quest_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get quest progress: {e}")))?;

        row.as_ref().map(row_to_progress).transpose()
    }

    /// Persist a newly computed progress value, marking the quest completed.
    ///
    /// `completed_at` is set only if not already set, so re-checking a
    /// completed quest never moves its completion time.
    pub async fn mark_completed(
        &self,
        user_id: Uuid,
        quest_id: i64,
        progress_value: i64,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_quest_progress (user_id, quest_id, progress_value, completed_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, quest_id)
            DO UPDATE SET
                progress_value = excluded.progress_value,
                completed_at = COALESCE(user_quest_progress.completed_at, excluded.completed_at)
            ",
        )
        .bind(user_id.to_string())
        .bind(quest_id)
        .bind(progress_value)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to mark quest completed: {e}")))?;

        Ok(())
    }

    /// Store an externally fed progress value without completing anything.
    ///
    /// Used for signals the server cannot derive from its own activity log,
    /// such as ranking placement.
    pub async fn set_progress_value(
        &self,
        user_id: Uuid,
        quest_id: i64,
        progress_value: i64,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_quest_progress (user_id, quest_id, progress_value)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, quest_id)
            DO UPDATE SET progress_value = excluded.progress_value
            ",
        )
        .bind(user_id.to_string())
        .bind(quest_id)
        .bind(progress_value)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to set quest progress: {e}")))?;

        Ok(())
    }

    /// Claim the reward for a completed quest.
    ///
    /// Runs as a single transaction. The conditional `UPDATE ... WHERE
    /// completed_at IS NOT NULL AND claimed_at IS NULL` is the guard: of any
    /// number of concurrent claims, exactly one update takes effect and only
    /// that caller applies the reward. Repeatable quests then reset for the
    /// next tier before the commit.
    pub async fn claim_quest(
        &self,
        user_id: Uuid,
        def: &QuestDefinition,
    ) -> AppResult<ClaimedReward> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let row = sqlx::query(
            r"
            SELECT completed_at, claimed_at FROM user_quest_progress
            WHERE user_id = $1 AND quest_id = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(def.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to read quest progress: {e}")))?;

        // No row at all means the user never progressed this quest: that is
        // a missing resource, not a gameplay conflict
        let row = row.ok_or_else(|| AppError::not_found("Quest progress").with_user_id(user_id))?;
        if row.get::<Option<String>, _>("completed_at").is_none() {
            return Err(AppError::new(
                ErrorCode::QuestNotCompleted,
                messages::QUEST_NOT_COMPLETED,
            )
            .with_user_id(user_id));
        }

        let updated = sqlx::query(
            r"
            UPDATE user_quest_progress
            SET claimed_at = $1
            WHERE user_id = $2 AND quest_id = $3
              AND completed_at IS NOT NULL AND claimed_at IS NULL
            ",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(user_id.to_string())
        .bind(def.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to claim quest: {e}")))?;

        if updated.rows_affected() == 0 {
            // Completed but the guard matched nothing, so another claim won
            return Err(AppError::new(
                ErrorCode::RewardAlreadyClaimed,
                messages::REWARD_ALREADY_CLAIMED,
            )
            .with_user_id(user_id));
        }

        apply_quest_reward(&mut tx, user_id, def).await?;

        if def.is_repeatable {
            sqlx::query(
                r"
                UPDATE user_quest_progress
                SET completed_at = NULL, claimed_at = NULL,
                    progress_value = 0, current_tier = current_tier + 1
                WHERE user_id = $1 AND quest_id = $2
                ",
            )
            .bind(user_id.to_string())
            .bind(def.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to advance quest tier: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit claim: {e}")))?;

        tracing::info!(
            user_id = %user_id,
            quest_id = def.id,
            reward_type = def.reward_type.as_str(),
            reward_value = %def.reward_value,
            "Quest reward claimed"
        );

        Ok(ClaimedReward {
            reward_type: def.reward_type,
            reward_value: def.reward_value.clone(),
            reward_amount: def.reward_amount,
        })
    }
}

fn row_to_quest(row: &SqliteRow) -> AppResult<QuestDefinition> {
    let quest_type_str: String = row.get("quest_type");
    let condition_type_str: String = row.get("condition_type");
    let reward_type_str: String = row.get("reward_type");

    Ok(QuestDefinition {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        quest_type: QuestType::from_str(&quest_type_str)
            .map_err(|e| AppError::database(e.to_string()))?,
        condition_type: ConditionType::parse(&condition_type_str),
        condition_value: row.get("condition_value"),
        condition_extra: row.get("condition_extra"),
        reward_type: RewardType::from_str(&reward_type_str)
            .map_err(|e| AppError::database(e.to_string()))?,
        reward_value: row.get("reward_value"),
        reward_amount: row.get("reward_amount"),
        is_repeatable: row.get("is_repeatable"),
        tier_step: row.get("tier_step"),
        sort_order: row.get("sort_order"),
        icon: row.get("icon"),
    })
}

fn row_to_progress(row: &SqliteRow) -> AppResult<UserQuestProgress> {
    let user_id_str: String = row.get("user_id");
    let completed_at: Option<String> = row.get("completed_at");
    let claimed_at: Option<String> = row.get("claimed_at");

    Ok(UserQuestProgress {
        user_id: Uuid::parse_str(&user_id_str)
            .map_err(|e| AppError::database(format!("Invalid UUID: {e}")))?,
        quest_id: row.get("quest_id"),
        progress_value: row.get("progress_value"),
        completed_at: completed_at.as_deref().map(parse_datetime).transpose()?,
        claimed_at: claimed_at.as_deref().map(parse_datetime).transpose()?,
        current_tier: row.get("current_tier"),
    })
}
