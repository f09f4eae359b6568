// ABOUTME: Database management: pool, in-code migrations and catalog seeding
// ABOUTME: Per-domain manager structs wrap the pool for table operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

//! # Database Management
//!
//! This module provides SQLite persistence for the FitPet server: user
//! accounts and pet profiles, the quest/achievement catalogs, per-user
//! progress rows, the activity log and the reward inventory. Migrations are
//! in-code `CREATE TABLE IF NOT EXISTS` statements run at startup; the
//! catalogs are seeded idempotently from [`crate::catalog`].

/// Achievement progress rows and achievement claims
pub mod achievements;
/// Workout/attendance/challenge log and snapshot assembly
pub mod activity;
/// Reward inventory: consumables, accessories, backgrounds
pub mod inventory;
/// Quest catalog reads, progress rows and the claim transaction
pub mod quests;
/// User accounts and pet profiles
pub mod users;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::catalog;

/// Database handle owning the connection pool
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect, run migrations and seed the catalogs
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;
        db.seed_catalogs().await?;

        Ok(db)
    }

    /// Wrap an existing pool (tests); runs migrations and seeding
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let db = Self { pool };
        db.migrate().await?;
        db.seed_catalogs().await?;
        Ok(db)
    }

    /// In-memory database with a single connection, for tests
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    /// Get a reference to the database pool for manager construction
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_catalogs().await?;
        self.migrate_progress().await?;
        self.migrate_activity().await?;
        self.migrate_inventory().await?;
        Ok(())
    }

    async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                display_name TEXT,
                strength INTEGER NOT NULL DEFAULT 0,
                agility INTEGER NOT NULL DEFAULT 0,
                stamina INTEGER NOT NULL DEFAULT 0,
                concentration INTEGER NOT NULL DEFAULT 0,
                experience INTEGER NOT NULL DEFAULT 0,
                active_background TEXT,
                created_at TEXT NOT NULL,
                last_active TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_catalogs(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS quests (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                quest_type TEXT NOT NULL,
                condition_type TEXT NOT NULL,
                condition_value INTEGER NOT NULL,
                condition_extra TEXT,
                reward_type TEXT NOT NULL,
                reward_value TEXT NOT NULL,
                reward_amount INTEGER NOT NULL DEFAULT 1,
                is_repeatable INTEGER NOT NULL DEFAULT 0,
                tier_step INTEGER NOT NULL DEFAULT 1,
                sort_order INTEGER NOT NULL DEFAULT 0,
                icon TEXT NOT NULL DEFAULT ''
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS achievements (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                condition_type TEXT NOT NULL,
                condition_value INTEGER NOT NULL,
                reward INTEGER NOT NULL DEFAULT 0,
                icon TEXT NOT NULL DEFAULT ''
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_progress(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_quest_progress (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                quest_id INTEGER NOT NULL REFERENCES quests(id) ON DELETE CASCADE,
                progress_value INTEGER NOT NULL DEFAULT 0,
                completed_at TEXT,
                claimed_at TEXT,
                current_tier INTEGER NOT NULL DEFAULT 1,
                PRIMARY KEY (user_id, quest_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_achievements (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                achievement_id INTEGER NOT NULL REFERENCES achievements(id) ON DELETE CASCADE,
                completed_at TEXT,
                claimed_at TEXT,
                PRIMARY KEY (user_id, achievement_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_activity(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                workout_type TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                workout_date TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_records_user_date
             ON workout_records(user_id, workout_date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_attendance (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                PRIMARY KEY (user_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_challenge_completions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                stage INTEGER NOT NULL,
                completed_at TEXT NOT NULL,
                completed_date TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_challenge_progress (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                highest_stage INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_inventory(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_items (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                item_id TEXT NOT NULL,
                quantity INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (user_id, item_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_accessories (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                accessory_id TEXT NOT NULL,
                acquired_at TEXT NOT NULL,
                PRIMARY KEY (user_id, accessory_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Seed the quest and achievement catalogs.
    ///
    /// `INSERT OR IGNORE` keeps the operation idempotent across restarts;
    /// existing rows are never touched, so the catalog stays immutable at
    /// runtime.
    pub async fn seed_catalogs(&self) -> Result<()> {
        for def in catalog::seed_quests() {
            sqlx::query(
                r"
                INSERT OR IGNORE INTO quests (
                    id, name, description, quest_type, condition_type,
                    condition_value, condition_extra, reward_type, reward_value,
                    reward_amount, is_repeatable, tier_step, sort_order, icon
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                ",
            )
            .bind(def.id)
            .bind(&def.name)
            .bind(&def.description)
            .bind(def.quest_type.as_str())
            .bind(def.condition_type.as_str())
            .bind(def.condition_value)
            .bind(&def.condition_extra)
            .bind(def.reward_type.as_str())
            .bind(&def.reward_value)
            .bind(def.reward_amount)
            .bind(def.is_repeatable)
            .bind(def.tier_step)
            .bind(def.sort_order)
            .bind(&def.icon)
            .execute(&self.pool)
            .await?;
        }

        for def in catalog::seed_achievements() {
            sqlx::query(
                r"
                INSERT OR IGNORE INTO achievements (
                    id, name, description, category, condition_type,
                    condition_value, reward, icon
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ",
            )
            .bind(def.id)
            .bind(&def.name)
            .bind(&def.description)
            .bind(&def.category)
            .bind(def.condition_type.as_str())
            .bind(def.condition_value)
            .bind(def.reward)
            .bind(&def.icon)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
