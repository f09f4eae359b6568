// ABOUTME: Built-in immutable catalogs seeded at startup and read-only lookups
// ABOUTME: Quest/achievement seed rows, challenge stages and the item catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

//! Built-in gameplay catalogs
//!
//! The quest and achievement catalogs are seeded into their tables once at
//! startup (idempotently) and never mutated by the engine. The challenge
//! stage table and the item/accessory catalog are pure in-code lookups with
//! no runtime mutation anywhere.

use std::sync::OnceLock;

use crate::models::{
    AchievementCondition, AchievementDefinition, ChallengeStage, ConditionType, QuestDefinition,
    QuestType, RewardType,
};

/// Kind of entry in the item catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Stackable consumable with a quantity
    Consumable,
    /// Cosmetic accessory, owned or not owned
    Accessory,
}

/// One entry in the immutable item catalog
#[derive(Debug, Clone)]
pub struct ItemCatalogEntry {
    /// Stable item identifier used in reward values and inventory rows
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Consumable or accessory
    pub kind: ItemKind,
}

/// Full item catalog: consumables and accessories referenced by quest rewards
#[must_use]
pub const fn item_catalog() -> &'static [ItemCatalogEntry] {
    &[
        ItemCatalogEntry {
            id: "protein_shake",
            name: "프로틴 쉐이크",
            kind: ItemKind::Consumable,
        },
        ItemCatalogEntry {
            id: "energy_drink",
            name: "에너지 드링크",
            kind: ItemKind::Consumable,
        },
        ItemCatalogEntry {
            id: "starter_headband",
            name: "초심자의 머리띠",
            kind: ItemKind::Accessory,
        },
        ItemCatalogEntry {
            id: "magic_cape",
            name: "마법의 망토",
            kind: ItemKind::Accessory,
        },
        ItemCatalogEntry {
            id: "silver_shoes",
            name: "은빛 운동화",
            kind: ItemKind::Accessory,
        },
        ItemCatalogEntry {
            id: "golden_shoes",
            name: "황금 운동화",
            kind: ItemKind::Accessory,
        },
        ItemCatalogEntry {
            id: "champion_crown",
            name: "챔피언의 왕관",
            kind: ItemKind::Accessory,
        },
        ItemCatalogEntry {
            id: "medal_top5",
            name: "톱5 메달",
            kind: ItemKind::Accessory,
        },
    ]
}

/// The six-stage running challenge, ordered by stage
#[must_use]
pub fn challenge_stages() -> &'static [ChallengeStage] {
    static STAGES: OnceLock<Vec<ChallengeStage>> = OnceLock::new();
    STAGES.get_or_init(|| {
        let minutes = [15, 14, 13, 12, 11, 10];
        minutes
            .iter()
            .enumerate()
            .map(|(i, m)| ChallengeStage {
                stage: i as i64 + 1,
                name: format!("{}단계: 3km 달리기", i + 1),
                description: format!("3km를 {m}분 안에 완주하세요"),
            })
            .collect()
    })
}

fn quest(
    id: i64,
    name: &str,
    description: &str,
    quest_type: QuestType,
    condition_type: ConditionType,
    condition_value: i64,
    reward_type: RewardType,
    reward_value: &str,
    reward_amount: i64,
    icon: &str,
) -> QuestDefinition {
    let is_repeatable = condition_type.is_tiered();
    QuestDefinition {
        id,
        name: name.to_owned(),
        description: description.to_owned(),
        quest_type,
        condition_type,
        condition_value,
        condition_extra: None,
        reward_type,
        reward_value: reward_value.to_owned(),
        reward_amount,
        is_repeatable,
        tier_step: 1,
        sort_order: id,
        icon: icon.to_owned(),
    }
}

/// Built-in quest catalog seeded at startup
#[must_use]
pub fn seed_quests() -> Vec<QuestDefinition> {
    use ConditionType as C;
    use QuestType as Q;
    use RewardType as R;
    vec![
        // daily
        quest(1, "유산소 운동 20분", "오늘 유산소 운동을 20분 하세요", Q::Daily, C::AerobicMin, 20, R::Stat, "agility", 1, "run"),
        quest(2, "근력 운동 30분", "오늘 근력 운동을 30분 하세요", Q::Daily, C::WeightMin, 30, R::Stat, "strength", 1, "dumbbell"),
        quest(3, "인터벌 운동 10분", "오늘 인터벌 운동을 10분 하세요", Q::Daily, C::IntervalMin, 10, R::Stat, "stamina", 1, "timer"),
        quest(4, "오늘의 출석", "앱에 접속해 출석 도장을 찍으세요", Q::Daily, C::Attendance, 1, R::Stat, "concentration", 1, "calendar"),
        // weekly
        quest(5, "일일 퀘스트 15회", "이번 주에 일일 퀘스트를 15회 완료하세요", Q::Weekly, C::DailyQuestCount, 15, R::Item, "protein_shake", 3, "star"),
        quest(6, "주간 유산소 100분", "이번 주 유산소 운동 100분을 채우세요", Q::Weekly, C::AerobicMinWeek, 100, R::Stat, "agility", 3, "run"),
        quest(7, "주간 근력 120분", "이번 주 근력 운동 120분을 채우세요", Q::Weekly, C::WeightMinWeek, 120, R::Stat, "strength", 3, "dumbbell"),
        quest(8, "주간 인터벌 40분", "이번 주 인터벌 운동 40분을 채우세요", Q::Weekly, C::IntervalMinWeek, 40, R::Stat, "stamina", 3, "timer"),
        quest(9, "주 5회 출석", "이번 주에 5일 출석하세요", Q::Weekly, C::AttendanceCount, 5, R::Item, "energy_drink", 2, "calendar"),
        quest(10, "챌린지 3회 완주", "이번 주에 챌린지를 3회 완주하세요", Q::Weekly, C::ChallengeCount, 3, R::Item, "protein_shake", 1, "flag"),
        // lifetime, one-shot
        quest(11, "첫 30분", "운동 시간을 총 30분 쌓으세요", Q::Lifetime, C::WorkoutAny30Min, 30, R::Accessory, "starter_headband", 1, "medal"),
        quest(12, "첫 진화", "펫을 2단계로 진화시키세요", Q::Lifetime, C::EvolutionStage, 2, R::Background, "sunrise_park", 1, "egg"),
        quest(13, "최종 진화", "펫을 3단계로 진화시키세요", Q::Lifetime, C::EvolutionStage, 3, R::Background, "night_city", 1, "crown"),
        quest(14, "마법의 3일", "3일 이상 출석하고 운동 90분을 쌓으세요", Q::Lifetime, C::Magic3Days, 90, R::Accessory, "magic_cape", 1, "sparkles"),
        quest(15, "3km 15분 완주", "챌린지 1단계를 완료하세요", Q::Lifetime, C::Run3km15Min, 1, R::Accessory, "silver_shoes", 1, "shoe"),
        quest(16, "3km 10분 완주", "챌린지 6단계를 완료하세요", Q::Lifetime, C::Run3km10Min, 1, R::Accessory, "golden_shoes", 1, "shoe"),
        quest(17, "진화 후 100일 출석", "최종 진화 후 100일 출석을 달성하세요", Q::Lifetime, C::AttendanceAfterEvolution, 100, R::Background, "hall_of_fame", 1, "trophy"),
        quest(18, "랭킹 1위", "주간 랭킹 1위에 올라보세요", Q::Lifetime, C::Ranking1st, 1, R::Accessory, "champion_crown", 1, "crown"),
        quest(19, "랭킹 톱5", "주간 랭킹 5위 안에 들어보세요", Q::Lifetime, C::RankingTop5, 1, R::Accessory, "medal_top5", 1, "medal"),
        quest(20, "불금 출석 50회", "금요일 출석을 50회 모으세요", Q::Lifetime, C::FridayAttendance, 50, R::Item, "energy_drink", 10, "fire"),
        // lifetime, tiered repeatable
        quest(21, "레벨 {n} 달성", "펫 레벨을 {n}까지 올리세요", Q::Lifetime, C::LevelTier, 5, R::Stat, "all_stats", 2, "level"),
        quest(22, "출석 {n}일", "출석일을 총 {n}일 모으세요", Q::Lifetime, C::AttendanceTier, 10, R::Item, "energy_drink", 1, "calendar"),
        quest(23, "유산소 누적 {n}분", "유산소 운동을 총 {n}분 쌓으세요", Q::Lifetime, C::AerobicTotalTier, 300, R::Stat, "agility", 5, "run"),
        quest(24, "근력 누적 {n}분", "근력 운동을 총 {n}분 쌓으세요", Q::Lifetime, C::WeightTotalTier, 300, R::Stat, "strength", 5, "dumbbell"),
        quest(25, "인터벌 누적 {n}분", "인터벌 운동을 총 {n}분 쌓으세요", Q::Lifetime, C::IntervalTotalTier, 100, R::Stat, "stamina", 5, "timer"),
        quest(26, "트라이애슬론 {n}분", "세 종류 운동을 각각 {n}분씩 쌓으세요", Q::Lifetime, C::TriathlonTier, 30, R::Stat, "all_stats", 3, "triathlon"),
    ]
}

fn achievement(
    id: i64,
    name: &str,
    description: &str,
    category: &str,
    condition_type: AchievementCondition,
    condition_value: i64,
    reward: i64,
    icon: &str,
) -> AchievementDefinition {
    AchievementDefinition {
        id,
        name: name.to_owned(),
        description: description.to_owned(),
        category: category.to_owned(),
        condition_type,
        condition_value,
        reward,
        icon: icon.to_owned(),
    }
}

/// Built-in achievement catalog seeded at startup
#[must_use]
pub fn seed_achievements() -> Vec<AchievementDefinition> {
    use AchievementCondition as A;
    vec![
        achievement(1, "첫 운동", "첫 운동을 기록하세요", "workout", A::FirstWorkout, 1, 50, "spark"),
        achievement(2, "운동 10회", "운동을 10회 기록하세요", "workout", A::WorkoutCount, 10, 100, "flame"),
        achievement(3, "운동 50회", "운동을 50회 기록하세요", "workout", A::WorkoutCount, 50, 300, "flame"),
        achievement(4, "3일 연속", "3일 연속으로 운동하세요", "streak", A::StreakDays, 3, 100, "streak"),
        achievement(5, "7일 연속", "7일 연속으로 운동하세요", "streak", A::StreakDays, 7, 300, "streak"),
        achievement(6, "레벨 5", "펫 레벨 5를 달성하세요", "growth", A::LevelReached, 5, 200, "level"),
        achievement(7, "레벨 10", "펫 레벨 10을 달성하세요", "growth", A::LevelReached, 10, 500, "level"),
        achievement(8, "함께하는 운동", "친구 3명과 함께하세요", "social", A::FriendCount, 3, 100, "friends"),
        achievement(9, "성실한 하루", "일일 퀘스트를 10회 완료하세요", "quest", A::DailyQuest, 10, 100, "star"),
        achievement(10, "주간 목표", "주간 목표를 4회 달성하세요", "quest", A::WeeklyGoal, 4, 200, "target"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_stages_are_sequential() {
        let stages = challenge_stages();
        assert_eq!(stages.len(), 6);
        for (i, stage) in stages.iter().enumerate() {
            assert_eq!(stage.stage, i as i64 + 1);
        }
    }

    #[test]
    fn test_seed_quest_ids_unique() {
        let quests = seed_quests();
        let mut ids: Vec<i64> = quests.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), quests.len());
    }

    #[test]
    fn test_reward_item_ids_exist_in_item_catalog() {
        let catalog = item_catalog();
        for def in seed_quests() {
            match def.reward_type {
                RewardType::Item | RewardType::Accessory => {
                    assert!(
                        catalog.iter().any(|item| item.id == def.reward_value),
                        "quest {} rewards unknown item {}",
                        def.id,
                        def.reward_value
                    );
                }
                RewardType::Stat | RewardType::Background => {}
            }
        }
    }

    #[test]
    fn test_tiered_quests_are_repeatable() {
        for def in seed_quests() {
            assert_eq!(def.is_repeatable, def.condition_type.is_tiered());
        }
    }
}
