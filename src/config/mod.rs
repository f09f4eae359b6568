// ABOUTME: Server configuration module
// ABOUTME: Environment-driven settings for HTTP, database and auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

/// Environment variable parsing into the typed server config
pub mod environment;

pub use environment::ServerConfig;
