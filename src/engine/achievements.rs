// ABOUTME: Achievement condition evaluation, a simpler subset of quest evaluation
// ABOUTME: Includes the all-or-nothing consecutive-day streak back-scan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::Duration;

use crate::models::{AchievementCondition, AchievementDefinition};

use super::evaluator::Evaluation;
use super::snapshot::ActivitySnapshot;

/// Evaluate an achievement condition against the snapshot.
///
/// Achievements carry no tiers and no stored progress value; unknown and
/// placeholder conditions evaluate to zero progress, never completed.
#[must_use]
pub fn evaluate_achievement(def: &AchievementDefinition, snap: &ActivitySnapshot) -> Evaluation {
    match &def.condition_type {
        AchievementCondition::FirstWorkout => {
            let count = snap.workout_count();
            Evaluation {
                progress: count.min(1),
                completed: count >= 1,
            }
        }
        AchievementCondition::WorkoutCount => {
            let count = snap.workout_count();
            Evaluation {
                progress: count,
                completed: count >= def.condition_value,
            }
        }
        AchievementCondition::StreakDays => {
            let streak = current_streak(snap, def.condition_value);
            Evaluation {
                progress: streak,
                completed: streak >= def.condition_value,
            }
        }
        AchievementCondition::LevelReached => Evaluation {
            progress: snap.level,
            completed: snap.level >= def.condition_value,
        },
        // Friends, daily-quest and weekly-goal counters have no data source
        // yet; they stay incomplete until those features land
        AchievementCondition::FriendCount
        | AchievementCondition::DailyQuest
        | AchievementCondition::WeeklyGoal
        | AchievementCondition::Unknown(_) => Evaluation {
            progress: 0,
            completed: false,
        },
    }
}

/// Length of the unbroken run of workout days counting back from today,
/// capped at `window`. A single gap anywhere in the window ends the streak
/// regardless of older history.
fn current_streak(snap: &ActivitySnapshot, window: i64) -> i64 {
    let mut streak = 0;
    for offset in 0..window.max(0) {
        let day = snap.today - Duration::days(offset);
        if snap.has_workout_on(day) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}
