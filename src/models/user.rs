// ABOUTME: User account and virtual-pet profile model
// ABOUTME: Level is a derived view over accumulated stat totals, never stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::leveling;

/// A registered user and their pet's stat totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: Uuid,
    /// Login email, unique
    pub email: String,
    /// Bcrypt password hash; never serialized to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Pet strength stat
    pub strength: i64,
    /// Pet agility stat
    pub agility: i64,
    /// Pet stamina stat
    pub stamina: i64,
    /// Pet concentration stat
    pub concentration: i64,
    /// Accumulated achievement experience
    pub experience: i64,
    /// Active home-screen background, if any reward set one
    pub active_background: Option<String>,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Last request time
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new account with a zeroed pet profile
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            display_name,
            strength: 0,
            agility: 0,
            stamina: 0,
            concentration: 0,
            experience: 0,
            active_background: None,
            created_at: now,
            last_active: now,
        }
    }

    /// Sum of the four pet stats
    #[must_use]
    pub const fn total_stats(&self) -> i64 {
        self.strength + self.agility + self.stamina + self.concentration
    }

    /// Pet level, derived from total stats: one level per 100 points.
    /// Derived view only; nothing in the engine stores a level column.
    #[must_use]
    pub const fn level(&self) -> i64 {
        self.total_stats() / leveling::STAT_POINTS_PER_LEVEL + 1
    }

    /// Pet evolution stage derived from level
    #[must_use]
    pub const fn evolution_stage(&self) -> i64 {
        let level = self.level();
        if level >= leveling::EVOLUTION_STAGE3_LEVEL {
            3
        } else if level >= leveling::EVOLUTION_STAGE2_LEVEL {
            2
        } else {
            1
        }
    }
}
