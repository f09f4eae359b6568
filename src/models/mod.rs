// ABOUTME: Common data models for gameplay and activity data
// ABOUTME: Catalog definitions, per-user progress rows and activity log records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

//! Data models for the FitPet gameplay engine
//!
//! Catalog types (`QuestDefinition`, `AchievementDefinition`, `ChallengeStage`)
//! are immutable at runtime; per-user progress rows are mutated exclusively by
//! the check and claim operations.

/// Achievement catalog and progress types
pub mod achievement;
/// Activity log records: workouts, attendance, challenge completions
pub mod activity;
/// Quest catalog, condition taxonomy and progress types
pub mod quest;
/// User account and pet profile
pub mod user;

pub use achievement::{AchievementCondition, AchievementDefinition, UserAchievementProgress};
pub use activity::{ChallengeCompletion, ChallengeStage, WorkoutRecord, WorkoutType};
pub use quest::{
    ClaimedReward, ConditionType, QuestDefinition, QuestType, RewardType, UserQuestProgress,
};
pub use user::User;
