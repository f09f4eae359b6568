// ABOUTME: Database lifecycle tests: file creation, reopening, idempotent seeding
// ABOUTME: Uses a temporary directory for file-backed SQLite databases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::NaiveDate;
use sqlx::Row;

use fitpet_server::database::activity::ActivityManager;
use fitpet_server::database::quests::QuestsManager;
use fitpet_server::database::Database;

#[tokio::test]
async fn test_file_database_created_and_reopened() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}/fitpet.db", dir.path().display());

    let db = Database::new(&url).await.unwrap();
    let catalog = QuestsManager::new(db.pool().clone())
        .load_catalog()
        .await
        .unwrap();
    assert_eq!(catalog.len(), 26);
    db.pool().close().await;

    // Reopening runs migrations and seeding again without duplicating rows
    let db = Database::new(&url).await.unwrap();
    let catalog = QuestsManager::new(db.pool().clone())
        .load_catalog()
        .await
        .unwrap();
    assert_eq!(catalog.len(), 26);

    let achievements: i64 = sqlx::query("SELECT COUNT(*) AS cnt FROM achievements")
        .fetch_one(db.pool())
        .await
        .unwrap()
        .get("cnt");
    assert_eq!(achievements, 10);
}

#[tokio::test]
async fn test_weekly_challenge_count_buckets_on_local_day() {
    let db = common::test_db().await;
    let user = common::create_test_user(&db).await;

    // A completion around midnight can carry a UTC timestamp dated the day
    // before its local calendar day; the weekly window must follow the
    // stored local day, like workouts and attendance do
    sqlx::query(
        r"
        INSERT INTO user_challenge_completions (user_id, stage, completed_at, completed_date)
        VALUES ($1, 1, '2025-06-15T23:00:00+00:00', '2025-06-16')
        ",
    )
    .bind(user.id.to_string())
    .execute(db.pool())
    .await
    .unwrap();

    // 2025-06-16 is a Monday, so the completion belongs to this week
    let monday = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
    let snapshot = ActivityManager::new(db.pool().clone())
        .load_snapshot(user.id, 1, monday)
        .await
        .unwrap();
    assert_eq!(snapshot.weekly_challenge_count, 1);

    // The previous week must not count it
    let previous_sunday = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let snapshot = ActivityManager::new(db.pool().clone())
        .load_snapshot(user.id, 1, previous_sunday)
        .await
        .unwrap();
    assert_eq!(snapshot.weekly_challenge_count, 0);
}

#[tokio::test]
async fn test_catalog_loads_in_display_order() {
    let db = common::test_db().await;
    let catalog = QuestsManager::new(db.pool().clone())
        .load_catalog()
        .await
        .unwrap();

    let orders: Vec<i64> = catalog.iter().map(|q| q.sort_order).collect();
    let mut sorted = orders.clone();
    sorted.sort_unstable();
    assert_eq!(orders, sorted);
}
