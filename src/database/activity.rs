// ABOUTME: Activity log database operations and snapshot assembly
// ABOUTME: Workouts, attendance days, challenge completions and the high-water mark
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::{Duration, Local, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use std::collections::BTreeSet;
use std::str::FromStr;
use uuid::Uuid;

use crate::engine::{week_monday, ActivitySnapshot, WorkoutEntry};
use crate::errors::{AppError, AppResult};
use crate::models::{ChallengeCompletion, WorkoutType};

use super::users::parse_datetime;

/// Activity log database operations manager
pub struct ActivityManager {
    pool: SqlitePool,
}

impl ActivityManager {
    /// Create a new activity manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Server-local calendar day
    #[must_use]
    pub fn local_today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Append a workout record
    pub async fn record_workout(
        &self,
        user_id: Uuid,
        workout_type: WorkoutType,
        duration_minutes: i64,
        workout_date: NaiveDate,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO workout_records (user_id, workout_type, duration_minutes, workout_date)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user_id.to_string())
        .bind(workout_type.as_str())
        .bind(duration_minutes)
        .bind(workout_date.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record workout: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Record attendance for a day; at most one row per calendar day, so a
    /// repeated call is a no-op. Returns whether a new row was inserted.
    pub async fn record_attendance(&self, user_id: Uuid, date: NaiveDate) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO user_attendance (user_id, date) VALUES ($1, $2)",
        )
        .bind(user_id.to_string())
        .bind(date.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record attendance: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// The user's highest sequentially completed challenge stage (0 if none)
    pub async fn highest_stage(&self, user_id: Uuid) -> AppResult<i64> {
        let row = sqlx::query(
            "SELECT highest_stage FROM user_challenge_progress WHERE user_id = $1",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get challenge progress: {e}")))?;

        Ok(row.map_or(0, |r| r.get("highest_stage")))
    }

    /// Log a challenge-stage completion and raise the high-water mark.
    ///
    /// The completion log is append-only (stages can be re-run); the
    /// high-water mark only ever moves up. The local calendar day is stored
    /// alongside the timestamp because weekly counting buckets on local days,
    /// which can differ from the UTC date near midnight.
    pub async fn record_challenge_completion(&self, user_id: Uuid, stage: i64) -> AppResult<i64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO user_challenge_completions (user_id, stage, completed_at, completed_date)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user_id.to_string())
        .bind(stage)
        .bind(Utc::now().to_rfc3339())
        .bind(Self::local_today().to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to log challenge completion: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO user_challenge_progress (user_id, highest_stage)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET highest_stage = MAX(highest_stage, excluded.highest_stage)
            ",
        )
        .bind(user_id.to_string())
        .bind(stage)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update highest stage: {e}")))?;

        let new_highest: i64 = sqlx::query(
            "SELECT highest_stage FROM user_challenge_progress WHERE user_id = $1",
        )
        .bind(user_id.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to read highest stage: {e}")))?
        .get("highest_stage");

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit: {e}")))?;

        Ok(new_highest)
    }

    /// Every challenge completion for a user, newest first
    pub async fn challenge_completions(&self, user_id: Uuid) -> AppResult<Vec<ChallengeCompletion>> {
        let rows = sqlx::query(
            r"
            SELECT stage, completed_at FROM user_challenge_completions
            WHERE user_id = $1
            ORDER BY completed_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get challenge completions: {e}")))?;

        rows.iter()
            .map(|r| {
                let completed_at_str: String = r.get("completed_at");
                Ok(ChallengeCompletion {
                    stage: r.get("stage"),
                    completed_at: parse_datetime(&completed_at_str)?,
                })
            })
            .collect()
    }

    /// Assemble the read-only snapshot consumed by condition evaluation.
    ///
    /// Re-read fresh on every check/list call; the evaluator itself holds no
    /// state between requests.
    pub async fn load_snapshot(
        &self,
        user_id: Uuid,
        level: i64,
        today: NaiveDate,
    ) -> AppResult<ActivitySnapshot> {
        let monday = week_monday(today);

        let workout_rows = sqlx::query(
            r"
            SELECT workout_type, duration_minutes, workout_date
            FROM workout_records
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load workouts: {e}")))?;

        let workouts = workout_rows
            .iter()
            .map(|r| {
                let type_str: String = r.get("workout_type");
                let date_str: String = r.get("workout_date");
                Ok(WorkoutEntry {
                    workout_type: WorkoutType::from_str(&type_str)
                        .map_err(|e| AppError::database(e.to_string()))?,
                    duration_minutes: r.get("duration_minutes"),
                    date: parse_date(&date_str)?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let attendance_rows = sqlx::query("SELECT date FROM user_attendance WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load attendance: {e}")))?;

        let attendance = attendance_rows
            .iter()
            .map(|r| {
                let date_str: String = r.get("date");
                parse_date(&date_str)
            })
            .collect::<AppResult<BTreeSet<_>>>()?;

        // Week window is [monday, monday+6] in local calendar days; the
        // stored completed_date is already local, matching workout and
        // attendance day semantics
        let week_end = monday + Duration::days(6);
        let weekly_challenge_count: i64 = sqlx::query(
            r"
            SELECT COUNT(*) AS cnt FROM user_challenge_completions
            WHERE user_id = $1
              AND completed_date >= $2
              AND completed_date <= $3
            ",
        )
        .bind(user_id.to_string())
        .bind(monday.to_string())
        .bind(week_end.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count challenges: {e}")))?
        .get("cnt");

        let highest_stage = self.highest_stage(user_id).await?;

        Ok(ActivitySnapshot {
            today,
            week_monday: monday,
            level,
            workouts,
            attendance,
            weekly_challenge_count,
            highest_stage,
        })
    }
}

pub(crate) fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| AppError::database(format!("Invalid date: {e}")))
}
