// ABOUTME: Main library entry point for the FitPet gamification backend
// ABOUTME: Provides the quest/achievement engine and REST API for the mobile client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

#![deny(unsafe_code)]

//! # FitPet Server
//!
//! Backend for a mobile fitness-gamification application. The mobile client
//! presents a virtual pet that grows as the user works out; this server owns
//! the gameplay state behind it:
//!
//! - **Quests**: daily/weekly/lifetime objectives, optionally repeatable with
//!   escalating tiers, evaluated against the user's activity log
//! - **Achievements**: one-shot objectives with flat experience rewards
//! - **Challenges**: a sequential six-stage running challenge with a
//!   high-water mark per user
//! - **Rewards**: stat increases, consumable items, accessories and
//!   backgrounds, granted at most once per completion
//!
//! The condition evaluator is a pure function over a per-user activity
//! snapshot; all mutation happens through the check and claim operations.
//! Persistence is SQLite via sqlx, the HTTP surface is Axum.

/// JWT authentication and password handling
pub mod auth;

/// Built-in immutable catalogs: seed quests/achievements, challenge stages, items
pub mod catalog;

/// Configuration management
pub mod config;

/// Application constants and user-facing messages
pub mod constants;

/// Database managers and in-code migrations
pub mod database;

/// Condition evaluation, progress tracking and claim semantics
pub mod engine;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// Common data models for gameplay and activity data
pub mod models;

/// Shared server resource container for dependency injection
pub mod resources;

/// HTTP routes for the REST API
pub mod routes;
