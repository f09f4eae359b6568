// ABOUTME: Reward inventory operations: consumables, accessories, backgrounds
// ABOUTME: Reward application runs inside the claim transaction, never alone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::Utc;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::catalog::{item_catalog, ItemKind};
use crate::errors::{AppError, AppResult};
use crate::models::{QuestDefinition, RewardType};

/// Accessory ownership in the merged inventory view
#[derive(Debug, Clone, serde::Serialize)]
pub struct AccessoryStatus {
    /// Catalog item ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the user owns it
    pub owned: bool,
}

/// Consumable quantity in the merged inventory view
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConsumableStatus {
    /// Catalog item ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Held quantity, zero if never granted
    pub quantity: i64,
}

/// Merged inventory view over the item catalog
#[derive(Debug, Clone, serde::Serialize)]
pub struct InventoryView {
    /// All catalog accessories with ownership flags
    pub accessories: Vec<AccessoryStatus>,
    /// All catalog consumables with held quantities
    pub consumables: Vec<ConsumableStatus>,
}

/// Inventory database operations manager
pub struct InventoryManager {
    pool: SqlitePool,
}

impl InventoryManager {
    /// Create a new inventory manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Merged view of accessory ownership and consumable quantities,
    /// covering every catalog item whether or not the user holds it
    pub async fn get_inventory(&self, user_id: Uuid) -> AppResult<InventoryView> {
        let item_rows = sqlx::query("SELECT item_id, quantity FROM user_items WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get items: {e}")))?;

        let accessory_rows =
            sqlx::query("SELECT accessory_id FROM user_accessories WHERE user_id = $1")
                .bind(user_id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to get accessories: {e}")))?;

        let quantities: std::collections::HashMap<String, i64> = item_rows
            .iter()
            .map(|r| (r.get("item_id"), r.get("quantity")))
            .collect();
        let owned: std::collections::HashSet<String> = accessory_rows
            .iter()
            .map(|r| r.get("accessory_id"))
            .collect();

        let mut accessories = Vec::new();
        let mut consumables = Vec::new();
        for entry in item_catalog() {
            match entry.kind {
                ItemKind::Accessory => accessories.push(AccessoryStatus {
                    id: entry.id.to_owned(),
                    name: entry.name.to_owned(),
                    owned: owned.contains(entry.id),
                }),
                ItemKind::Consumable => consumables.push(ConsumableStatus {
                    id: entry.id.to_owned(),
                    name: entry.name.to_owned(),
                    quantity: quantities.get(entry.id).copied().unwrap_or(0),
                }),
            }
        }

        Ok(InventoryView {
            accessories,
            consumables,
        })
    }
}

/// Apply a quest reward inside the claim transaction.
///
/// Each branch is idempotent in itself where the reward kind demands it:
/// accessories are insert-if-absent and never stack even if the claim guard
/// were bypassed; consumables accumulate; backgrounds overwrite.
pub(crate) async fn apply_quest_reward(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: Uuid,
    def: &QuestDefinition,
) -> AppResult<()> {
    match def.reward_type {
        RewardType::Stat => {
            apply_stat_reward(tx, user_id, &def.reward_value, def.reward_amount).await
        }
        RewardType::Item => {
            sqlx::query(
                r"
                INSERT INTO user_items (user_id, item_id, quantity)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, item_id)
                DO UPDATE SET quantity = quantity + excluded.quantity
                ",
            )
            .bind(user_id.to_string())
            .bind(&def.reward_value)
            .bind(def.reward_amount)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to grant item: {e}")))?;
            Ok(())
        }
        RewardType::Accessory => {
            sqlx::query(
                r"
                INSERT OR IGNORE INTO user_accessories (user_id, accessory_id, acquired_at)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(user_id.to_string())
            .bind(&def.reward_value)
            .bind(Utc::now().to_rfc3339())
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to grant accessory: {e}")))?;
            Ok(())
        }
        RewardType::Background => {
            sqlx::query("UPDATE users SET active_background = $1 WHERE id = $2")
                .bind(&def.reward_value)
                .bind(user_id.to_string())
                .execute(&mut **tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to set background: {e}")))?;
            Ok(())
        }
    }
}

/// Increment one pet stat, or all four for `all_stats`.
///
/// Column names come from a closed match, never from the catalog string.
async fn apply_stat_reward(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: Uuid,
    stat: &str,
    amount: i64,
) -> AppResult<()> {
    let sql = match stat {
        "strength" => "UPDATE users SET strength = strength + $1 WHERE id = $2",
        "agility" => "UPDATE users SET agility = agility + $1 WHERE id = $2",
        "stamina" => "UPDATE users SET stamina = stamina + $1 WHERE id = $2",
        "concentration" => "UPDATE users SET concentration = concentration + $1 WHERE id = $2",
        "all_stats" => {
            "UPDATE users SET strength = strength + $1, agility = agility + $1, \
             stamina = stamina + $1, concentration = concentration + $1 WHERE id = $2"
        }
        other => {
            return Err(AppError::internal(format!(
                "Catalog references unknown stat: {other}"
            )))
        }
    };

    sqlx::query(sql)
        .bind(amount)
        .bind(user_id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply stat reward: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::database::users::UsersManager;
    use crate::database::Database;
    use crate::models::{ConditionType, QuestType, User};

    async fn setup() -> (Database, Uuid) {
        let db = Database::in_memory().await.unwrap();
        let user = User::new("inv@example.com".to_owned(), "hash".to_owned(), None);
        UsersManager::new(db.pool().clone())
            .create_user(&user)
            .await
            .unwrap();
        (db, user.id)
    }

    fn reward_quest(reward_type: RewardType, reward_value: &str, reward_amount: i64) -> QuestDefinition {
        QuestDefinition {
            id: 900,
            name: "test".to_owned(),
            description: "test".to_owned(),
            quest_type: QuestType::Lifetime,
            condition_type: ConditionType::Attendance,
            condition_value: 1,
            condition_extra: None,
            reward_type,
            reward_value: reward_value.to_owned(),
            reward_amount,
            is_repeatable: false,
            tier_step: 1,
            sort_order: 900,
            icon: String::new(),
        }
    }

    async fn apply(db: &Database, user_id: Uuid, def: &QuestDefinition) {
        let mut tx = db.pool().begin().await.unwrap();
        apply_quest_reward(&mut tx, user_id, def).await.unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_item_rewards_accumulate() {
        let (db, user_id) = setup().await;
        let def = reward_quest(RewardType::Item, "protein_shake", 3);

        apply(&db, user_id, &def).await;
        apply(&db, user_id, &def).await;

        let view = InventoryManager::new(db.pool().clone())
            .get_inventory(user_id)
            .await
            .unwrap();
        let shake = view
            .consumables
            .iter()
            .find(|c| c.id == "protein_shake")
            .unwrap();
        assert_eq!(shake.quantity, 6);
    }

    #[tokio::test]
    async fn test_accessory_grant_is_idempotent() {
        let (db, user_id) = setup().await;
        let def = reward_quest(RewardType::Accessory, "magic_cape", 1);

        apply(&db, user_id, &def).await;
        apply(&db, user_id, &def).await;

        let view = InventoryManager::new(db.pool().clone())
            .get_inventory(user_id)
            .await
            .unwrap();
        let cape = view.accessories.iter().find(|a| a.id == "magic_cape").unwrap();
        assert!(cape.owned);

        let rows = sqlx::query(
            "SELECT COUNT(*) AS cnt FROM user_accessories WHERE user_id = $1 AND accessory_id = $2",
        )
        .bind(user_id.to_string())
        .bind("magic_cape")
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(rows.get::<i64, _>("cnt"), 1);
    }

    #[tokio::test]
    async fn test_all_stats_reward_raises_every_stat() {
        let (db, user_id) = setup().await;
        let def = reward_quest(RewardType::Stat, "all_stats", 2);

        apply(&db, user_id, &def).await;

        let user = UsersManager::new(db.pool().clone())
            .get_user(user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.strength, 2);
        assert_eq!(user.agility, 2);
        assert_eq!(user.stamina, 2);
        assert_eq!(user.concentration, 2);
    }

    #[tokio::test]
    async fn test_unknown_stat_is_rejected() {
        let (db, user_id) = setup().await;
        let def = reward_quest(RewardType::Stat, "charisma", 1);

        let mut tx = db.pool().begin().await.unwrap();
        assert!(apply_quest_reward(&mut tx, user_id, &def).await.is_err());
    }

    #[tokio::test]
    async fn test_background_reward_overwrites() {
        let (db, user_id) = setup().await;

        apply(&db, user_id, &reward_quest(RewardType::Background, "sunrise_park", 1)).await;
        apply(&db, user_id, &reward_quest(RewardType::Background, "night_city", 1)).await;

        let user = UsersManager::new(db.pool().clone())
            .get_user(user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.active_background.as_deref(), Some("night_city"));
    }
}
