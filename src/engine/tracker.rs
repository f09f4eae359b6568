// ABOUTME: Progress tracker tying catalogs, stored rows and live evaluation together
// ABOUTME: Backs the list and check operations for quests and achievements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::achievements::AchievementsManager;
use crate::database::activity::ActivityManager;
use crate::database::quests::QuestsManager;
use crate::database::users::UsersManager;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;

use super::achievements::evaluate_achievement;
use super::evaluator::evaluate_quest;
use super::snapshot::ActivitySnapshot;

/// One quest as presented to the client: definition, live progress and
/// claim state merged
#[derive(Debug, Clone, Serialize)]
pub struct QuestStatus {
    /// Quest ID
    pub id: i64,
    /// Display name with any tier placeholder substituted
    pub name: String,
    /// Display description with any tier placeholder substituted
    pub description: String,
    /// Quest category: daily, weekly or challenge
    pub quest_type: String,
    /// Current progress toward the target
    pub progress: i64,
    /// Target for the current tier
    pub target: i64,
    /// Current tier (1 for non-tiered quests)
    pub tier: i64,
    /// Whether the condition is met
    pub completed: bool,
    /// Whether the reward was already claimed
    pub claimed: bool,
    /// Reward kind
    pub reward_type: String,
    /// Reward payload: stat name, item ID or background ID
    pub reward_value: String,
    /// Reward quantity
    pub reward_amount: i64,
    /// Icon identifier
    pub icon: String,
}

/// One achievement as presented to the client
#[derive(Debug, Clone, Serialize)]
pub struct AchievementStatus {
    /// Achievement ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Display description
    pub description: String,
    /// Grouping category
    pub category: String,
    /// Current progress toward the target
    pub progress: i64,
    /// Completion target
    pub target: i64,
    /// Whether the condition is met
    pub completed: bool,
    /// Whether the experience reward was already claimed
    pub claimed: bool,
    /// Experience granted on claim
    pub reward: i64,
    /// Icon identifier
    pub icon: String,
}

/// Evaluates quest and achievement conditions against a fresh activity
/// snapshot and persists completions.
///
/// Stateless between calls: every operation re-reads the activity log, so
/// two back-to-back checks with no new activity report the same result.
pub struct ProgressTracker {
    database: Arc<Database>,
}

impl ProgressTracker {
    /// Create a tracker over the shared database handle
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    async fn load_context(&self, user_id: Uuid) -> AppResult<(User, ActivitySnapshot)> {
        let users = UsersManager::new(self.database.pool().clone());
        let user = users
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let activity = ActivityManager::new(self.database.pool().clone());
        let snapshot = activity
            .load_snapshot(user_id, user.level(), ActivityManager::local_today())
            .await?;

        Ok((user, snapshot))
    }

    /// Re-evaluate every quest and persist any new completions.
    ///
    /// Returns the IDs of quests that flipped to completed in this call.
    /// Already-completed rows are left untouched, so completion times and
    /// the claim state never move.
    pub async fn check_quests(&self, user_id: Uuid) -> AppResult<Vec<i64>> {
        let (_, snapshot) = self.load_context(user_id).await?;
        let quests = QuestsManager::new(self.database.pool().clone());

        let catalog = quests.load_catalog().await?;
        let progress = quests.quest_progress(user_id).await?;
        let now = Utc::now();

        let mut newly_completed = Vec::new();
        for def in &catalog {
            let row = progress.get(&def.id);
            if row.is_some_and(|r| r.completed_at.is_some()) {
                continue;
            }
            let tier = row.map_or(1, |r| r.current_tier);
            let stored = row.map_or(0, |r| r.progress_value);

            let eval = evaluate_quest(def, tier, stored, &snapshot);
            if eval.completed {
                quests
                    .mark_completed(user_id, def.id, eval.progress, now)
                    .await?;
                newly_completed.push(def.id);
            }
        }

        if !newly_completed.is_empty() {
            tracing::debug!(
                user_id = %user_id,
                count = newly_completed.len(),
                "Quests newly completed"
            );
        }

        Ok(newly_completed)
    }

    /// The full quest list with live progress, in catalog display order
    pub async fn list_quests(&self, user_id: Uuid) -> AppResult<Vec<QuestStatus>> {
        let (_, snapshot) = self.load_context(user_id).await?;
        let quests = QuestsManager::new(self.database.pool().clone());

        let catalog = quests.load_catalog().await?;
        let progress = quests.quest_progress(user_id).await?;

        let statuses = catalog
            .iter()
            .map(|def| {
                let row = progress.get(&def.id);
                let tier = row.map_or(1, |r| r.current_tier);
                let stored = row.map_or(0, |r| r.progress_value);
                let stored_completed = row.is_some_and(|r| r.completed_at.is_some());
                let claimed = row.is_some_and(|r| r.claimed_at.is_some());

                let eval = evaluate_quest(def, tier, stored, &snapshot);

                QuestStatus {
                    id: def.id,
                    name: def.display_name(tier),
                    description: def.display_description(tier),
                    quest_type: def.quest_type.as_str().to_owned(),
                    progress: eval.progress,
                    target: def.target(tier),
                    tier,
                    completed: stored_completed || eval.completed,
                    claimed,
                    reward_type: def.reward_type.as_str().to_owned(),
                    reward_value: def.reward_value.clone(),
                    reward_amount: def.reward_amount,
                    icon: def.icon.clone(),
                }
            })
            .collect();

        Ok(statuses)
    }

    /// Re-evaluate every achievement and persist any new completions
    pub async fn check_achievements(&self, user_id: Uuid) -> AppResult<Vec<i64>> {
        let (_, snapshot) = self.load_context(user_id).await?;
        let achievements = AchievementsManager::new(self.database.pool().clone());

        let catalog = achievements.load_catalog().await?;
        let progress = achievements.achievement_progress(user_id).await?;
        let now = Utc::now();

        let mut newly_completed = Vec::new();
        for def in &catalog {
            if progress
                .get(&def.id)
                .is_some_and(|r| r.completed_at.is_some())
            {
                continue;
            }
            if evaluate_achievement(def, &snapshot).completed {
                achievements.mark_completed(user_id, def.id, now).await?;
                newly_completed.push(def.id);
            }
        }

        Ok(newly_completed)
    }

    /// The full achievement list with live progress
    pub async fn list_achievements(&self, user_id: Uuid) -> AppResult<Vec<AchievementStatus>> {
        let (_, snapshot) = self.load_context(user_id).await?;
        let achievements = AchievementsManager::new(self.database.pool().clone());

        let catalog = achievements.load_catalog().await?;
        let progress = achievements.achievement_progress(user_id).await?;

        let statuses = catalog
            .iter()
            .map(|def| {
                let row = progress.get(&def.id);
                let stored_completed = row.is_some_and(|r| r.completed_at.is_some());
                let claimed = row.is_some_and(|r| r.claimed_at.is_some());

                let eval = evaluate_achievement(def, &snapshot);

                AchievementStatus {
                    id: def.id,
                    name: def.name.clone(),
                    description: def.description.clone(),
                    category: def.category.clone(),
                    progress: eval.progress,
                    target: def.condition_value,
                    completed: stored_completed || eval.completed,
                    claimed,
                    reward: def.reward,
                    icon: def.icon.clone(),
                }
            })
            .collect();

        Ok(statuses)
    }
}
