// ABOUTME: Quest lifecycle integration tests: check, completion, claim, tier reset
// ABOUTME: Exercises the tracker and claim transaction against a seeded database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use fitpet_server::database::activity::ActivityManager;
use fitpet_server::database::quests::QuestsManager;
use fitpet_server::database::users::UsersManager;
use fitpet_server::database::Database;
use fitpet_server::engine::ProgressTracker;
use fitpet_server::errors::ErrorCode;
use fitpet_server::models::{RewardType, User, WorkoutType};

use std::sync::Arc;

const DAILY_AEROBIC: i64 = 1;
const DAILY_WEIGHT: i64 = 2;
const AEROBIC_TOTAL_TIER: i64 = 23;
const RANKING_FIRST: i64 = 18;

struct Fixture {
    db: Database,
    user: User,
    tracker: ProgressTracker,
}

async fn fixture() -> Fixture {
    let db = common::test_db().await;
    let user = common::create_test_user(&db).await;
    let tracker = ProgressTracker::new(Arc::new(db.clone()));
    Fixture { db, user, tracker }
}

impl Fixture {
    fn activity(&self) -> ActivityManager {
        ActivityManager::new(self.db.pool().clone())
    }

    fn quests(&self) -> QuestsManager {
        QuestsManager::new(self.db.pool().clone())
    }

    async fn record_aerobic(&self, minutes: i64) {
        self.activity()
            .record_workout(
                self.user.id,
                WorkoutType::Aerobic,
                minutes,
                ActivityManager::local_today(),
            )
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_check_is_idempotent() {
    let f = fixture().await;
    f.record_aerobic(20).await;

    let first = f.tracker.check_quests(f.user.id).await.unwrap();
    assert_eq!(first, vec![DAILY_AEROBIC]);

    // Same activity, second check reports nothing new
    let second = f.tracker.check_quests(f.user.id).await.unwrap();
    assert!(second.is_empty());

    let progress = f
        .quests()
        .get_progress(f.user.id, DAILY_AEROBIC)
        .await
        .unwrap()
        .unwrap();
    assert!(progress.completed_at.is_some());
    assert!(progress.claimed_at.is_none());
}

#[tokio::test]
async fn test_exact_target_boundary() {
    let f = fixture().await;
    f.record_aerobic(19).await;

    assert!(f.tracker.check_quests(f.user.id).await.unwrap().is_empty());

    let list = f.tracker.list_quests(f.user.id).await.unwrap();
    let daily = list.iter().find(|q| q.id == DAILY_AEROBIC).unwrap();
    assert_eq!(daily.progress, 19);
    assert_eq!(daily.target, 20);
    assert!(!daily.completed);

    // One more minute lands exactly on the target
    f.record_aerobic(1).await;
    let newly = f.tracker.check_quests(f.user.id).await.unwrap();
    assert_eq!(newly, vec![DAILY_AEROBIC]);
}

#[tokio::test]
async fn test_claim_requires_completion() {
    let f = fixture().await;
    let def = f.quests().get_quest(DAILY_WEIGHT).await.unwrap().unwrap();

    // Never-progressed quest: no row exists, so there is nothing to claim
    let err = f.quests().claim_quest(f.user.id, &def).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    // A row with progress but no completion is a gameplay conflict instead
    f.quests()
        .set_progress_value(f.user.id, DAILY_WEIGHT, 10)
        .await
        .unwrap();
    let err = f.quests().claim_quest(f.user.id, &def).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::QuestNotCompleted);
    assert_eq!(err.message, "아직 완료되지 않은 퀘스트입니다");
}

#[tokio::test]
async fn test_claim_grants_reward_exactly_once() {
    let f = fixture().await;
    f.record_aerobic(20).await;
    f.tracker.check_quests(f.user.id).await.unwrap();

    let def = f.quests().get_quest(DAILY_AEROBIC).await.unwrap().unwrap();
    let reward = f.quests().claim_quest(f.user.id, &def).await.unwrap();
    assert_eq!(reward.reward_type, RewardType::Stat);
    assert_eq!(reward.reward_value, "agility");

    let user = UsersManager::new(f.db.pool().clone())
        .get_user(f.user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.agility, 1);

    let err = f.quests().claim_quest(f.user.id, &def).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::RewardAlreadyClaimed);
    assert_eq!(err.message, "이미 보상을 받았습니다");

    // The reward was not applied a second time
    let user = UsersManager::new(f.db.pool().clone())
        .get_user(f.user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.agility, 1);
}

#[tokio::test]
async fn test_repeatable_quest_resets_and_escalates() {
    let f = fixture().await;
    f.record_aerobic(300).await;
    let newly = f.tracker.check_quests(f.user.id).await.unwrap();
    assert!(newly.contains(&AEROBIC_TOTAL_TIER));

    let def = f
        .quests()
        .get_quest(AEROBIC_TOTAL_TIER)
        .await
        .unwrap()
        .unwrap();
    f.quests().claim_quest(f.user.id, &def).await.unwrap();

    // Claim reset the row for the next tier
    let progress = f
        .quests()
        .get_progress(f.user.id, AEROBIC_TOTAL_TIER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.current_tier, 2);
    assert!(progress.completed_at.is_none());
    assert!(progress.claimed_at.is_none());
    assert_eq!(progress.progress_value, 0);

    // Tier 2 doubles the target; 300 accumulated minutes no longer complete it
    let list = f.tracker.list_quests(f.user.id).await.unwrap();
    let tiered = list.iter().find(|q| q.id == AEROBIC_TOTAL_TIER).unwrap();
    assert_eq!(tiered.tier, 2);
    assert_eq!(tiered.target, 600);
    assert_eq!(tiered.progress, 300);
    assert!(!tiered.completed);
    assert!(tiered.name.contains("600"));

    let err = f.quests().claim_quest(f.user.id, &def).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::QuestNotCompleted);

    // Tier never moves back down
    f.record_aerobic(300).await;
    let newly = f.tracker.check_quests(f.user.id).await.unwrap();
    assert!(newly.contains(&AEROBIC_TOTAL_TIER));
    let progress = f
        .quests()
        .get_progress(f.user.id, AEROBIC_TOTAL_TIER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.current_tier, 2);
}

#[tokio::test]
async fn test_externally_fed_ranking_progress() {
    let f = fixture().await;

    // Ranking placement comes from outside the activity log
    assert!(f.tracker.check_quests(f.user.id).await.unwrap().is_empty());

    f.quests()
        .set_progress_value(f.user.id, RANKING_FIRST, 1)
        .await
        .unwrap();
    let newly = f.tracker.check_quests(f.user.id).await.unwrap();
    assert!(newly.contains(&RANKING_FIRST));

    let def = f.quests().get_quest(RANKING_FIRST).await.unwrap().unwrap();
    let reward = f.quests().claim_quest(f.user.id, &def).await.unwrap();
    assert_eq!(reward.reward_type, RewardType::Accessory);
    assert_eq!(reward.reward_value, "champion_crown");
}

#[tokio::test]
async fn test_completed_rows_survive_further_checks() {
    let f = fixture().await;
    f.record_aerobic(25).await;
    f.tracker.check_quests(f.user.id).await.unwrap();

    let before = f
        .quests()
        .get_progress(f.user.id, DAILY_AEROBIC)
        .await
        .unwrap()
        .unwrap();

    f.record_aerobic(10).await;
    f.tracker.check_quests(f.user.id).await.unwrap();

    // Completion time did not move
    let after = f
        .quests()
        .get_progress(f.user.id, DAILY_AEROBIC)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(before.completed_at, after.completed_at);
}
