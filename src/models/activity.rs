// ABOUTME: Activity log records read by the condition evaluator
// ABOUTME: Workouts, attendance days and challenge-stage completions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

use crate::constants::messages;
use crate::errors::AppError;

/// Workout categories tracked by the app's timer screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutType {
    /// Cardio: running, cycling, swimming
    Aerobic,
    /// Strength training
    Weight,
    /// Interval training
    Interval,
}

impl Display for WorkoutType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl WorkoutType {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aerobic => "aerobic",
            Self::Weight => "weight",
            Self::Interval => "interval",
        }
    }
}

impl FromStr for WorkoutType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aerobic" => Ok(Self::Aerobic),
            "weight" => Ok(Self::Weight),
            "interval" => Ok(Self::Interval),
            _ => Err(AppError::invalid_input(messages::INVALID_WORKOUT_TYPE)),
        }
    }
}

/// One logged workout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Row ID
    pub id: i64,
    /// Owning user
    pub user_id: Uuid,
    /// Workout category
    pub workout_type: WorkoutType,
    /// Session length in minutes
    pub duration_minutes: i64,
    /// Local calendar day of the session
    pub workout_date: NaiveDate,
}

/// One entry in the immutable challenge-stage catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeStage {
    /// Stage number, 1 through 6
    pub stage: i64,
    /// Display name
    pub name: String,
    /// Display description
    pub description: String,
}

/// Append-only log entry for every challenge-stage completion
///
/// Distinct from the per-user `highest_stage` high-water mark: stages may be
/// re-completed and each completion is logged here for weekly counting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeCompletion {
    /// Stage completed
    pub stage: i64,
    /// Completion time
    pub completed_at: DateTime<Utc>,
}
