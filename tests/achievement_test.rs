// ABOUTME: Achievement integration tests: check, streaks, experience claims
// ABOUTME: Runs against the seeded catalog and an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::Duration;
use std::sync::Arc;

use fitpet_server::database::achievements::AchievementsManager;
use fitpet_server::database::activity::ActivityManager;
use fitpet_server::database::users::UsersManager;
use fitpet_server::engine::ProgressTracker;
use fitpet_server::errors::ErrorCode;
use fitpet_server::models::WorkoutType;

const FIRST_WORKOUT: i64 = 1;
const STREAK_3_DAYS: i64 = 4;

#[tokio::test]
async fn test_first_workout_achievement_and_claim() {
    let db = common::test_db().await;
    let user = common::create_test_user(&db).await;
    let tracker = ProgressTracker::new(Arc::new(db.clone()));

    assert!(tracker.check_achievements(user.id).await.unwrap().is_empty());

    ActivityManager::new(db.pool().clone())
        .record_workout(
            user.id,
            WorkoutType::Weight,
            10,
            ActivityManager::local_today(),
        )
        .await
        .unwrap();

    let newly = tracker.check_achievements(user.id).await.unwrap();
    assert!(newly.contains(&FIRST_WORKOUT));

    let achievements = AchievementsManager::new(db.pool().clone());
    let def = achievements
        .get_achievement(FIRST_WORKOUT)
        .await
        .unwrap()
        .unwrap();

    let experience = achievements.claim_achievement(user.id, &def).await.unwrap();
    assert_eq!(experience, 50);

    let loaded = UsersManager::new(db.pool().clone())
        .get_user(user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.experience, 50);

    let err = achievements
        .claim_achievement(user.id, &def)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RewardAlreadyClaimed);
}

#[tokio::test]
async fn test_claim_uncompleted_achievement_rejected() {
    let db = common::test_db().await;
    let user = common::create_test_user(&db).await;

    let achievements = AchievementsManager::new(db.pool().clone());
    let def = achievements
        .get_achievement(STREAK_3_DAYS)
        .await
        .unwrap()
        .unwrap();

    // No progress row yet: nothing to claim
    let err = achievements
        .claim_achievement(user.id, &def)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    // An incomplete row rejects with the gameplay message instead
    sqlx::query("INSERT INTO user_achievements (user_id, achievement_id) VALUES ($1, $2)")
        .bind(user.id.to_string())
        .bind(STREAK_3_DAYS)
        .execute(db.pool())
        .await
        .unwrap();
    let err = achievements
        .claim_achievement(user.id, &def)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::QuestNotCompleted);
}

#[tokio::test]
async fn test_streak_is_all_or_nothing() {
    let db = common::test_db().await;
    let user = common::create_test_user(&db).await;
    let tracker = ProgressTracker::new(Arc::new(db.clone()));
    let activity = ActivityManager::new(db.pool().clone());

    let today = ActivityManager::local_today();
    // Workouts today, yesterday, and three days ago: the gap at day two
    // breaks the streak even though three days have workouts
    for offset in [0, 1, 3] {
        activity
            .record_workout(
                user.id,
                WorkoutType::Aerobic,
                15,
                today - Duration::days(offset),
            )
            .await
            .unwrap();
    }

    let newly = tracker.check_achievements(user.id).await.unwrap();
    assert!(!newly.contains(&STREAK_3_DAYS));

    let list = tracker.list_achievements(user.id).await.unwrap();
    let streak = list.iter().find(|a| a.id == STREAK_3_DAYS).unwrap();
    assert_eq!(streak.progress, 2);
    assert!(!streak.completed);

    // Filling the gap completes it
    activity
        .record_workout(
            user.id,
            WorkoutType::Aerobic,
            15,
            today - Duration::days(2),
        )
        .await
        .unwrap();
    let newly = tracker.check_achievements(user.id).await.unwrap();
    assert!(newly.contains(&STREAK_3_DAYS));
}
