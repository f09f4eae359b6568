// ABOUTME: Gameplay engine: condition evaluation, progress tracking, claims
// ABOUTME: Pure evaluation over activity snapshots; mutation only via check/claim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

//! # Gameplay engine
//!
//! The engine is split into a pure half and an orchestration half:
//!
//! - [`snapshot`] assembles a read-only per-user view of the activity log
//! - [`evaluator`] and [`achievements`] are pure functions from
//!   `(condition, snapshot)` to `(progress, completed)`
//! - [`tracker`] runs the check and list operations, persisting newly
//!   completed rows and merging live evaluation with stored claim state
//!
//! Claims live in the database layer because their at-most-once guarantee is
//! a transactional property of the store, not of the evaluation.

/// Achievement condition evaluation, including streak back-scan
pub mod achievements;
/// Quest condition evaluation and the shared target computation
pub mod evaluator;
/// Read-only per-user activity view consumed by evaluation
pub mod snapshot;
/// Check/list orchestration over catalog, snapshot and stored progress
pub mod tracker;

pub use evaluator::{evaluate_quest, Evaluation};
pub use snapshot::{week_monday, ActivitySnapshot, WorkoutEntry};
pub use tracker::{AchievementStatus, ProgressTracker, QuestStatus};
