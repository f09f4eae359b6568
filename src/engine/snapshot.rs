// ABOUTME: Read-only per-user activity snapshot consumed by condition evaluation
// ABOUTME: Local-calendar day semantics, Monday-anchored weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;

use crate::constants::daily_targets;
use crate::models::WorkoutType;

/// Monday of the week containing `date`
#[must_use]
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// One workout as seen by the evaluator
#[derive(Debug, Clone)]
pub struct WorkoutEntry {
    /// Workout category
    pub workout_type: WorkoutType,
    /// Session length in minutes
    pub duration_minutes: i64,
    /// Local calendar day of the session
    pub date: NaiveDate,
}

/// Read-only view of everything condition evaluation may consult
///
/// Assembled fresh per request; the evaluator holds no state across calls.
/// "Today" is the server's local calendar day, injected here so evaluation
/// stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct ActivitySnapshot {
    /// Server-local calendar day of the request
    pub today: NaiveDate,
    /// Monday of the current week
    pub week_monday: NaiveDate,
    /// Pet level derived from the profile's stat totals
    pub level: i64,
    /// Full workout log
    pub workouts: Vec<WorkoutEntry>,
    /// Distinct attendance days, at most one per calendar day
    pub attendance: BTreeSet<NaiveDate>,
    /// Challenge-stage completions logged this week
    pub weekly_challenge_count: i64,
    /// High-water mark of sequential challenge completion
    pub highest_stage: i64,
}

impl ActivitySnapshot {
    /// Empty snapshot for the given day and level
    #[must_use]
    pub fn new(today: NaiveDate, level: i64) -> Self {
        Self {
            today,
            week_monday: week_monday(today),
            level,
            workouts: Vec::new(),
            attendance: BTreeSet::new(),
            weekly_challenge_count: 0,
            highest_stage: 0,
        }
    }

    /// Minutes of the given type on one day
    #[must_use]
    pub fn minutes_on(&self, date: NaiveDate, workout_type: WorkoutType) -> i64 {
        self.workouts
            .iter()
            .filter(|w| w.date == date && w.workout_type == workout_type)
            .map(|w| w.duration_minutes)
            .sum()
    }

    /// Minutes of the given type over `[from, to]` inclusive
    #[must_use]
    pub fn minutes_between(&self, from: NaiveDate, to: NaiveDate, workout_type: WorkoutType) -> i64 {
        self.workouts
            .iter()
            .filter(|w| w.date >= from && w.date <= to && w.workout_type == workout_type)
            .map(|w| w.duration_minutes)
            .sum()
    }

    /// Lifetime minutes of the given type
    #[must_use]
    pub fn total_minutes_of(&self, workout_type: WorkoutType) -> i64 {
        self.workouts
            .iter()
            .filter(|w| w.workout_type == workout_type)
            .map(|w| w.duration_minutes)
            .sum()
    }

    /// Lifetime minutes across all workout types
    #[must_use]
    pub fn total_minutes(&self) -> i64 {
        self.workouts.iter().map(|w| w.duration_minutes).sum()
    }

    /// This week's minutes of the given type, Monday through today
    #[must_use]
    pub fn weekly_minutes_of(&self, workout_type: WorkoutType) -> i64 {
        self.minutes_between(self.week_monday, self.today, workout_type)
    }

    /// Whether any workout exists on the given day
    #[must_use]
    pub fn has_workout_on(&self, date: NaiveDate) -> bool {
        self.workouts.iter().any(|w| w.date == date)
    }

    /// Total workout records logged
    #[must_use]
    pub fn workout_count(&self) -> i64 {
        self.workouts.len() as i64
    }

    /// Distinct attendance days in `[from, to]` inclusive
    #[must_use]
    pub fn attendance_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        self.attendance.range(from..=to).count() as i64
    }

    /// Total distinct attendance days
    #[must_use]
    pub fn attendance_total(&self) -> i64 {
        self.attendance.len() as i64
    }

    /// Attendance days falling on a Friday
    #[must_use]
    pub fn friday_attendance_count(&self) -> i64 {
        self.attendance
            .iter()
            .filter(|d| d.weekday() == Weekday::Fri)
            .count() as i64
    }

    /// Daily-quest completion flags for one day, 0 through 4: one each for
    /// reaching the aerobic/weight/interval daily thresholds plus attendance
    #[must_use]
    pub fn daily_quest_flags(&self, date: NaiveDate) -> i64 {
        let mut flags = 0;
        if self.minutes_on(date, WorkoutType::Aerobic) >= daily_targets::AEROBIC_MIN {
            flags += 1;
        }
        if self.minutes_on(date, WorkoutType::Weight) >= daily_targets::WEIGHT_MIN {
            flags += 1;
        }
        if self.minutes_on(date, WorkoutType::Interval) >= daily_targets::INTERVAL_MIN {
            flags += 1;
        }
        if self.attendance.contains(&date) {
            flags += 1;
        }
        flags
    }

    /// Sum of daily-quest flags from Monday through today
    #[must_use]
    pub fn weekly_daily_quest_count(&self) -> i64 {
        let mut total = 0;
        let mut day = self.week_monday;
        while day <= self.today {
            total += self.daily_quest_flags(day);
            day += Duration::days(1);
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_monday() {
        // 2025-06-18 is a Wednesday
        assert_eq!(week_monday(date(2025, 6, 18)), date(2025, 6, 16));
        // Monday maps to itself
        assert_eq!(week_monday(date(2025, 6, 16)), date(2025, 6, 16));
        // Sunday belongs to the preceding Monday
        assert_eq!(week_monday(date(2025, 6, 22)), date(2025, 6, 16));
    }

    #[test]
    fn test_daily_quest_flags() {
        let today = date(2025, 6, 18);
        let mut snap = ActivitySnapshot::new(today, 1);
        snap.workouts.push(WorkoutEntry {
            workout_type: WorkoutType::Aerobic,
            duration_minutes: 20,
            date: today,
        });
        snap.workouts.push(WorkoutEntry {
            workout_type: WorkoutType::Weight,
            duration_minutes: 29,
            date: today,
        });
        snap.attendance.insert(today);

        // aerobic at threshold and attendance count; weight one minute short
        assert_eq!(snap.daily_quest_flags(today), 2);
    }

    #[test]
    fn test_weekly_minutes_exclude_previous_week() {
        let today = date(2025, 6, 18);
        let mut snap = ActivitySnapshot::new(today, 1);
        snap.workouts.push(WorkoutEntry {
            workout_type: WorkoutType::Aerobic,
            duration_minutes: 30,
            date: date(2025, 6, 17),
        });
        snap.workouts.push(WorkoutEntry {
            workout_type: WorkoutType::Aerobic,
            duration_minutes: 45,
            date: date(2025, 6, 13), // previous week's Friday
        });

        assert_eq!(snap.weekly_minutes_of(WorkoutType::Aerobic), 30);
        assert_eq!(snap.total_minutes_of(WorkoutType::Aerobic), 75);
    }
}
