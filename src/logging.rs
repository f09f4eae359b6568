// ABOUTME: Structured logging setup for the server binary
// ABOUTME: Env-driven filter with pretty or JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` controls the filter (default `info`); setting
/// `FITPET_LOG_FORMAT=json` switches to line-delimited JSON for log
/// shippers, otherwise output is human-readable.
pub fn init_from_env() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("FITPET_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to init logging: {e}"))?;
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to init logging: {e}"))?;
    }

    Ok(())
}
