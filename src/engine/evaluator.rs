// ABOUTME: Pure quest condition evaluation over an activity snapshot
// ABOUTME: Exhaustive match per condition type; unknown tags are a no-op
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

//! Quest condition evaluation
//!
//! [`evaluate_quest`] maps a catalog definition, the user's current tier and
//! an [`ActivitySnapshot`] to `(progress, completed)`. It never fails and
//! never touches storage: unknown condition tags keep their stored progress
//! and stay incomplete, so one malformed catalog row cannot block a batch
//! check. The effective target comes from [`QuestDefinition::target`], the
//! same function that renders display text, so the enforced and the shown
//! target cannot drift apart.

use crate::constants::leveling;
use crate::models::{ConditionType, QuestDefinition, WorkoutType};

use super::snapshot::ActivitySnapshot;

/// Result of evaluating one condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Numeric progress toward the target, for display
    pub progress: i64,
    /// Whether the condition is satisfied
    pub completed: bool,
}

impl Evaluation {
    const fn met(progress: i64, target: i64) -> Self {
        Self {
            progress,
            completed: progress >= target,
        }
    }
}

/// Evaluate a quest condition at the given tier.
///
/// `stored_progress` is the last persisted progress value; it is only
/// consulted by the externally-fed ranking conditions and by unknown tags.
#[must_use]
pub fn evaluate_quest(
    def: &QuestDefinition,
    tier: i64,
    stored_progress: i64,
    snap: &ActivitySnapshot,
) -> Evaluation {
    let target = def.target(tier);
    match &def.condition_type {
        // ── daily ───────────────────────────────────────────────────────
        ConditionType::AerobicMin => {
            Evaluation::met(snap.minutes_on(snap.today, WorkoutType::Aerobic), target)
        }
        ConditionType::WeightMin => {
            Evaluation::met(snap.minutes_on(snap.today, WorkoutType::Weight), target)
        }
        ConditionType::IntervalMin => {
            Evaluation::met(snap.minutes_on(snap.today, WorkoutType::Interval), target)
        }
        ConditionType::Attendance => {
            let attended = snap.attendance.contains(&snap.today);
            Evaluation {
                progress: i64::from(attended),
                completed: attended,
            }
        }

        // ── weekly ──────────────────────────────────────────────────────
        ConditionType::DailyQuestCount => {
            Evaluation::met(snap.weekly_daily_quest_count(), target)
        }
        ConditionType::AerobicMinWeek => {
            Evaluation::met(snap.weekly_minutes_of(WorkoutType::Aerobic), target)
        }
        ConditionType::WeightMinWeek => {
            Evaluation::met(snap.weekly_minutes_of(WorkoutType::Weight), target)
        }
        ConditionType::IntervalMinWeek => {
            Evaluation::met(snap.weekly_minutes_of(WorkoutType::Interval), target)
        }
        ConditionType::AttendanceCount => {
            Evaluation::met(snap.attendance_between(snap.week_monday, snap.today), target)
        }
        ConditionType::ChallengeCount => Evaluation::met(snap.weekly_challenge_count, target),

        // ── lifetime ────────────────────────────────────────────────────
        ConditionType::WorkoutAny30Min => {
            let total = snap.total_minutes();
            Evaluation {
                progress: total.min(30),
                completed: total >= 30,
            }
        }
        ConditionType::EvolutionStage => {
            let stage = if snap.level >= leveling::EVOLUTION_STAGE3_LEVEL {
                3
            } else if snap.level >= leveling::EVOLUTION_STAGE2_LEVEL {
                2
            } else {
                1
            };
            Evaluation::met(stage, target)
        }
        ConditionType::Magic3Days => {
            let total = snap.total_minutes();
            Evaluation {
                progress: total.min(90),
                completed: total >= 90 && snap.attendance_total() >= 3,
            }
        }
        ConditionType::Run3km15Min => {
            let cleared = snap.highest_stage >= 1;
            Evaluation {
                progress: i64::from(cleared),
                completed: cleared,
            }
        }
        ConditionType::Run3km10Min => {
            let cleared = snap.highest_stage >= 6;
            Evaluation {
                progress: i64::from(cleared),
                completed: cleared,
            }
        }
        ConditionType::AttendanceAfterEvolution => {
            // The counter only runs once the pet has fully evolved
            let evolved = snap.level >= leveling::EVOLUTION_STAGE3_LEVEL;
            let days = if evolved { snap.attendance_total() } else { 0 };
            Evaluation {
                progress: days,
                completed: evolved && days >= target,
            }
        }
        // Ranking progress is written by an external ranking job; the
        // evaluator only reads the stored value back
        ConditionType::Ranking1st | ConditionType::RankingTop5 => Evaluation {
            progress: stored_progress,
            completed: stored_progress >= 1,
        },
        ConditionType::FridayAttendance => {
            Evaluation::met(snap.friday_attendance_count(), 50)
        }

        // ── lifetime, tiered ────────────────────────────────────────────
        ConditionType::LevelTier => Evaluation::met(snap.level, target),
        ConditionType::AttendanceTier => Evaluation::met(snap.attendance_total(), target),
        ConditionType::AerobicTotalTier => {
            Evaluation::met(snap.total_minutes_of(WorkoutType::Aerobic), target)
        }
        ConditionType::WeightTotalTier => {
            Evaluation::met(snap.total_minutes_of(WorkoutType::Weight), target)
        }
        ConditionType::IntervalTotalTier => {
            Evaluation::met(snap.total_minutes_of(WorkoutType::Interval), target)
        }
        ConditionType::TriathlonTier => {
            let aerobic = snap.total_minutes_of(WorkoutType::Aerobic);
            let weight = snap.total_minutes_of(WorkoutType::Weight);
            let interval = snap.total_minutes_of(WorkoutType::Interval);
            Evaluation {
                progress: aerobic.min(weight).min(interval),
                completed: aerobic >= target && weight >= target && interval >= target,
            }
        }

        ConditionType::Unknown(_) => Evaluation {
            progress: stored_progress,
            completed: false,
        },
    }
}
