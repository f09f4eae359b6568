// ABOUTME: Application constants, limits and user-facing message strings
// ABOUTME: Gameplay messages are Korean (the app's locale); logs stay English
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

//! Application constants and configuration values

/// User-facing gameplay messages, rendered verbatim by the mobile client
pub mod messages {
    /// Claim attempted on a quest/achievement that is not completed
    pub const QUEST_NOT_COMPLETED: &str = "아직 완료되지 않은 퀘스트입니다";
    /// Claim attempted twice
    pub const REWARD_ALREADY_CLAIMED: &str = "이미 보상을 받았습니다";
    /// Challenge stage attempted out of order
    pub const STAGE_SKIPPED: &str = "이전 단계를 먼저 완료해주세요";
    /// Challenge stage outside the valid range
    pub const STAGE_OUT_OF_RANGE: &str = "유효하지 않은 챌린지 단계입니다";
    /// Workout duration must be positive
    pub const INVALID_DURATION: &str = "운동 시간은 1분 이상이어야 합니다";
    /// Unknown workout type tag
    pub const INVALID_WORKOUT_TYPE: &str = "유효하지 않은 운동 종류입니다";
    /// Registration with an email that already has an account
    pub const EMAIL_TAKEN: &str = "이미 가입된 이메일입니다";
    /// Bad credentials on login
    pub const LOGIN_FAILED: &str = "이메일 또는 비밀번호가 올바르지 않습니다";
}

/// Validation limits
pub mod limits {
    /// Lowest challenge stage
    pub const CHALLENGE_STAGE_MIN: i64 = 1;
    /// Highest challenge stage
    pub const CHALLENGE_STAGE_MAX: i64 = 6;
    /// Minimum password length accepted at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Upper bound for a single workout record, minutes
    pub const MAX_WORKOUT_MINUTES: i64 = 24 * 60;
}

/// Profile leveling
pub mod leveling {
    /// Total stat points per pet level
    pub const STAT_POINTS_PER_LEVEL: i64 = 100;
    /// Level at which the pet reaches evolution stage 2
    pub const EVOLUTION_STAGE2_LEVEL: i64 = 10;
    /// Level at which the pet reaches evolution stage 3
    pub const EVOLUTION_STAGE3_LEVEL: i64 = 20;
}

/// Default daily-quest thresholds, used by the weekly `daily_quest_count`
/// condition when counting per-day completion flags
pub mod daily_targets {
    /// Aerobic minutes counting as a completed daily aerobic quest
    pub const AEROBIC_MIN: i64 = 20;
    /// Weight-training minutes counting as a completed daily weight quest
    pub const WEIGHT_MIN: i64 = 30;
    /// Interval minutes counting as a completed daily interval quest
    pub const INTERVAL_MIN: i64 = 10;
}
