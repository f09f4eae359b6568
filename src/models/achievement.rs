// ABOUTME: Achievement catalog types and per-user achievement progress rows
// ABOUTME: Achievements are one-shot, non-tiered, with flat experience rewards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Condition taxonomy for achievements, a strict subset of the quest taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AchievementCondition {
    /// At least one workout record exists
    FirstWorkout,
    /// Total workout records reach the target
    WorkoutCount,
    /// A workout on every one of the last N consecutive days, today inclusive
    StreakDays,
    /// Pet level reaches the target
    LevelReached,
    /// Placeholder: friends feature not implemented, always false
    FriendCount,
    /// Placeholder: always false
    DailyQuest,
    /// Placeholder: always false
    WeeklyGoal,
    /// Unrecognized catalog tag, preserved verbatim; evaluates as a no-op
    Unknown(String),
}

impl AchievementCondition {
    /// Parse a catalog tag; unrecognized tags become [`Self::Unknown`]
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "first_workout" => Self::FirstWorkout,
            "workout_count" => Self::WorkoutCount,
            "streak_days" => Self::StreakDays,
            "level_reached" => Self::LevelReached,
            "friend_count" => Self::FriendCount,
            "daily_quest" => Self::DailyQuest,
            "weekly_goal" => Self::WeeklyGoal,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Database string representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::FirstWorkout => "first_workout",
            Self::WorkoutCount => "workout_count",
            Self::StreakDays => "streak_days",
            Self::LevelReached => "level_reached",
            Self::FriendCount => "friend_count",
            Self::DailyQuest => "daily_quest",
            Self::WeeklyGoal => "weekly_goal",
            Self::Unknown(tag) => tag,
        }
    }
}

impl Display for AchievementCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One achievement catalog entry, immutable at runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDefinition {
    /// Catalog ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Display description
    pub description: String,
    /// Client-side grouping label
    pub category: String,
    /// Completion condition
    pub condition_type: AchievementCondition,
    /// Target value
    pub condition_value: i64,
    /// Flat experience reward applied on claim
    pub reward: i64,
    /// Client-side icon name
    pub icon: String,
}

/// Per-user achievement state; once set, both timestamps are permanent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAchievementProgress {
    /// Owning user
    pub user_id: Uuid,
    /// Catalog ID
    pub achievement_id: i64,
    /// Condition satisfied
    pub completed_at: Option<DateTime<Utc>>,
    /// Experience reward applied
    pub claimed_at: Option<DateTime<Utc>>,
}
