// ABOUTME: Quest catalog types, condition taxonomy and per-user progress rows
// ABOUTME: Condition tags parse into a closed enum so evaluation is exhaustive
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::AppError;

/// Quest scope: how often the objective can plausibly be earned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestType {
    /// Resets with the calendar day (conceptually; completion is monotonic)
    Daily,
    /// Evaluated over the Monday-anchored current week
    Weekly,
    /// Lifetime objective, stored under the legacy `challenge` tag
    Lifetime,
}

impl Display for QuestType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl QuestType {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            // The catalog predates the daily/weekly split and stores
            // lifetime quests as "challenge"
            Self::Lifetime => "challenge",
        }
    }
}

impl FromStr for QuestType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "challenge" | "lifetime" => Ok(Self::Lifetime),
            _ => Err(AppError::invalid_input(format!("Invalid quest type: {s}"))),
        }
    }
}

/// Condition taxonomy for quest completion
///
/// One variant per condition tag in the catalog. Unknown tags are preserved
/// in [`ConditionType::Unknown`] and evaluate as a no-op, so a malformed
/// catalog row can never fail a batch check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionType {
    // ── daily ───────────────────────────────────────────────────────────
    /// Today's aerobic minutes reach the target
    AerobicMin,
    /// Today's weight-training minutes reach the target
    WeightMin,
    /// Today's interval minutes reach the target
    IntervalMin,
    /// An attendance record exists for today
    Attendance,

    // ── weekly ──────────────────────────────────────────────────────────
    /// Per-day daily-quest completion flags summed over the current week
    DailyQuestCount,
    /// This week's aerobic minutes reach the target
    AerobicMinWeek,
    /// This week's weight-training minutes reach the target
    WeightMinWeek,
    /// This week's interval minutes reach the target
    IntervalMinWeek,
    /// Distinct attendance days this week reach the target
    AttendanceCount,
    /// Challenge-stage completions this week reach the target
    ChallengeCount,

    // ── lifetime ────────────────────────────────────────────────────────
    /// Any 30 lifetime workout minutes
    WorkoutAny30Min,
    /// Pet evolution stage derived from level
    EvolutionStage,
    /// 90 lifetime minutes and at least three attendance days
    Magic3Days,
    /// Challenge stage 1 cleared (3km under 15 minutes)
    Run3km15Min,
    /// Challenge stage 6 cleared (3km under 10 minutes)
    Run3km10Min,
    /// 100 attendance days after the pet's final evolution
    AttendanceAfterEvolution,
    /// Externally-fed ranking signal: reached first place
    Ranking1st,
    /// Externally-fed ranking signal: reached the top five
    RankingTop5,
    /// Fifty Friday attendance days
    FridayAttendance,

    // ── lifetime, tiered (repeatable) ───────────────────────────────────
    /// Pet level reaches the tiered target
    LevelTier,
    /// Total attendance days reach the tiered target
    AttendanceTier,
    /// Lifetime aerobic minutes reach the tiered target
    AerobicTotalTier,
    /// Lifetime weight-training minutes reach the tiered target
    WeightTotalTier,
    /// Lifetime interval minutes reach the tiered target
    IntervalTotalTier,
    /// All three lifetime sums reach the tiered target independently
    TriathlonTier,

    /// Unrecognized catalog tag, preserved verbatim; evaluates as a no-op
    Unknown(String),
}

impl ConditionType {
    /// Parse a catalog tag. Never fails: unrecognized tags become
    /// [`ConditionType::Unknown`].
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "aerobic_min" => Self::AerobicMin,
            "weight_min" => Self::WeightMin,
            "interval_min" => Self::IntervalMin,
            "attendance" => Self::Attendance,
            "daily_quest_count" => Self::DailyQuestCount,
            "aerobic_min_week" => Self::AerobicMinWeek,
            "weight_min_week" => Self::WeightMinWeek,
            "interval_min_week" => Self::IntervalMinWeek,
            "attendance_count" => Self::AttendanceCount,
            "challenge_count" => Self::ChallengeCount,
            "workout_any_30min" => Self::WorkoutAny30Min,
            "evolution_stage" => Self::EvolutionStage,
            "magic_3days" => Self::Magic3Days,
            "run_3km_15min" => Self::Run3km15Min,
            "run_3km_10min" => Self::Run3km10Min,
            "attendance_after_evolution" => Self::AttendanceAfterEvolution,
            "ranking_1st" => Self::Ranking1st,
            "ranking_top5" => Self::RankingTop5,
            "friday_attendance" => Self::FridayAttendance,
            "level_tier" => Self::LevelTier,
            "attendance_tier" => Self::AttendanceTier,
            "aerobic_total_tier" => Self::AerobicTotalTier,
            "weight_total_tier" => Self::WeightTotalTier,
            "interval_total_tier" => Self::IntervalTotalTier,
            "triathlon_tier" => Self::TriathlonTier,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Database string representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AerobicMin => "aerobic_min",
            Self::WeightMin => "weight_min",
            Self::IntervalMin => "interval_min",
            Self::Attendance => "attendance",
            Self::DailyQuestCount => "daily_quest_count",
            Self::AerobicMinWeek => "aerobic_min_week",
            Self::WeightMinWeek => "weight_min_week",
            Self::IntervalMinWeek => "interval_min_week",
            Self::AttendanceCount => "attendance_count",
            Self::ChallengeCount => "challenge_count",
            Self::WorkoutAny30Min => "workout_any_30min",
            Self::EvolutionStage => "evolution_stage",
            Self::Magic3Days => "magic_3days",
            Self::Run3km15Min => "run_3km_15min",
            Self::Run3km10Min => "run_3km_10min",
            Self::AttendanceAfterEvolution => "attendance_after_evolution",
            Self::Ranking1st => "ranking_1st",
            Self::RankingTop5 => "ranking_top5",
            Self::FridayAttendance => "friday_attendance",
            Self::LevelTier => "level_tier",
            Self::AttendanceTier => "attendance_tier",
            Self::AerobicTotalTier => "aerobic_total_tier",
            Self::WeightTotalTier => "weight_total_tier",
            Self::IntervalTotalTier => "interval_total_tier",
            Self::TriathlonTier => "triathlon_tier",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether this condition scales its target with the quest tier
    #[must_use]
    pub const fn is_tiered(&self) -> bool {
        matches!(
            self,
            Self::LevelTier
                | Self::AttendanceTier
                | Self::AerobicTotalTier
                | Self::WeightTotalTier
                | Self::IntervalTotalTier
                | Self::TriathlonTier
        )
    }
}

impl Display for ConditionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Kind of reward a quest grants on claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardType {
    /// Increment one pet stat (or all four for `all_stats`)
    Stat,
    /// Add consumables to the user's item inventory
    Item,
    /// Unlock an accessory (idempotent, never stacks)
    Accessory,
    /// Set the user's active home-screen background
    Background,
}

impl Display for RewardType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl RewardType {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stat => "stat",
            Self::Item => "item",
            Self::Accessory => "accessory",
            Self::Background => "background",
        }
    }
}

impl FromStr for RewardType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stat" => Ok(Self::Stat),
            "item" => Ok(Self::Item),
            "accessory" => Ok(Self::Accessory),
            "background" => Ok(Self::Background),
            _ => Err(AppError::invalid_input(format!("Invalid reward type: {s}"))),
        }
    }
}

/// One quest catalog entry, immutable at runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestDefinition {
    /// Catalog ID
    pub id: i64,
    /// Display name; may contain an `{n}` placeholder for the tiered target
    pub name: String,
    /// Display description; may contain an `{n}` placeholder
    pub description: String,
    /// Quest scope
    pub quest_type: QuestType,
    /// Completion condition
    pub condition_type: ConditionType,
    /// Base target value
    pub condition_value: i64,
    /// Opaque auxiliary parameter, unused by most conditions
    pub condition_extra: Option<String>,
    /// Kind of reward granted on claim
    pub reward_type: RewardType,
    /// Which stat/item/accessory/background the reward refers to
    pub reward_value: String,
    /// Reward quantity
    pub reward_amount: i64,
    /// Whether claiming re-arms the quest at the next tier
    pub is_repeatable: bool,
    /// Tier step recorded in the catalog; the effective target is always
    /// `condition_value * current_tier`
    pub tier_step: i64,
    /// Client-side ordering
    pub sort_order: i64,
    /// Client-side icon name
    pub icon: String,
}

impl QuestDefinition {
    /// Effective target at the given tier.
    ///
    /// The single source of truth shared by evaluation and display text, so
    /// the enforced target and the shown target cannot drift apart. Tiers
    /// below 1 are treated as 1.
    #[must_use]
    pub fn target(&self, tier: i64) -> i64 {
        if self.condition_type.is_tiered() {
            self.condition_value * tier.max(1)
        } else {
            self.condition_value
        }
    }

    /// Display name with the tiered target substituted for `{n}`
    #[must_use]
    pub fn display_name(&self, tier: i64) -> String {
        self.name.replace("{n}", &self.target(tier).to_string())
    }

    /// Display description with the tiered target substituted for `{n}`
    #[must_use]
    pub fn display_description(&self, tier: i64) -> String {
        self.description
            .replace("{n}", &self.target(tier).to_string())
    }
}

/// Per-user, per-quest mutable progress state
///
/// Invariants: `claimed_at` implies `completed_at`; for non-repeatable quests
/// a set `claimed_at` is permanent; for repeatable quests a claim clears both
/// timestamps and increments `current_tier`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserQuestProgress {
    /// Owning user
    pub user_id: Uuid,
    /// Catalog ID
    pub quest_id: i64,
    /// Last computed progress value, informational
    pub progress_value: i64,
    /// Condition satisfied, reward not necessarily claimed
    pub completed_at: Option<DateTime<Utc>>,
    /// Reward applied
    pub claimed_at: Option<DateTime<Utc>>,
    /// Current tier, starts at 1, advanced only by claiming repeatables
    pub current_tier: i64,
}

impl UserQuestProgress {
    /// Fresh progress row at tier 1
    #[must_use]
    pub const fn new(user_id: Uuid, quest_id: i64) -> Self {
        Self {
            user_id,
            quest_id,
            progress_value: 0,
            completed_at: None,
            claimed_at: None,
            current_tier: 1,
        }
    }
}

/// Reward granted by a successful claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimedReward {
    /// Kind of reward
    pub reward_type: RewardType,
    /// Which stat/item/accessory/background was granted
    pub reward_value: String,
    /// Quantity granted
    pub reward_amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered_def(condition_type: ConditionType, value: i64) -> QuestDefinition {
        QuestDefinition {
            id: 1,
            name: "레벨 {n} 달성".to_owned(),
            description: "펫 레벨을 {n}까지 올리세요".to_owned(),
            quest_type: QuestType::Lifetime,
            condition_type,
            condition_value: value,
            condition_extra: None,
            reward_type: RewardType::Stat,
            reward_value: "all_stats".to_owned(),
            reward_amount: 1,
            is_repeatable: true,
            tier_step: 1,
            sort_order: 0,
            icon: "level".to_owned(),
        }
    }

    #[test]
    fn test_condition_parse_round_trip() {
        for tag in [
            "aerobic_min",
            "daily_quest_count",
            "triathlon_tier",
            "friday_attendance",
            "run_3km_10min",
        ] {
            assert_eq!(ConditionType::parse(tag).as_str(), tag);
        }
    }

    #[test]
    fn test_unknown_condition_preserved() {
        let cond = ConditionType::parse("moonwalk_distance");
        assert_eq!(cond, ConditionType::Unknown("moonwalk_distance".to_owned()));
        assert_eq!(cond.as_str(), "moonwalk_distance");
        assert!(!cond.is_tiered());
    }

    #[test]
    fn test_target_scales_with_tier_only_when_tiered() {
        let tiered = tiered_def(ConditionType::LevelTier, 5);
        assert_eq!(tiered.target(1), 5);
        assert_eq!(tiered.target(3), 15);

        let flat = tiered_def(ConditionType::AerobicMin, 20);
        assert_eq!(flat.target(3), 20);
    }

    #[test]
    fn test_display_text_uses_tiered_target() {
        let def = tiered_def(ConditionType::LevelTier, 5);
        assert_eq!(def.display_name(2), "레벨 10 달성");
        assert_eq!(def.display_description(2), "펫 레벨을 10까지 올리세요");
    }
}
