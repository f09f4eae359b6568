// ABOUTME: Typed server configuration loaded from environment variables
// ABOUTME: Every knob has a development default; production sets them explicitly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use anyhow::{Context, Result};
use rand::RngCore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Database connection URL
    pub database_url: String,
    /// Secret used to sign session tokens
    pub jwt_secret: String,
    /// Session token lifetime in hours
    pub token_expiry_hours: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing values fall back to development defaults; a missing
    /// `FITPET_JWT_SECRET` generates an ephemeral secret, which invalidates
    /// all sessions on restart, so production must set it.
    pub fn from_env() -> Result<Self> {
        let http_port = std::env::var("FITPET_HTTP_PORT")
            .unwrap_or_else(|_| "8081".to_owned())
            .parse()
            .context("Invalid FITPET_HTTP_PORT")?;

        let database_url = std::env::var("FITPET_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/fitpet.db".to_owned());

        let jwt_secret = match std::env::var("FITPET_JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!(
                    "FITPET_JWT_SECRET not set, generating ephemeral secret; \
                     sessions will not survive a restart"
                );
                let mut bytes = [0u8; 32];
                rand::thread_rng().fill_bytes(&mut bytes);
                hex::encode(bytes)
            }
        };

        let token_expiry_hours = std::env::var("FITPET_TOKEN_EXPIRY_HOURS")
            .unwrap_or_else(|_| "24".to_owned())
            .parse()
            .context("Invalid FITPET_TOKEN_EXPIRY_HOURS")?;

        Ok(Self {
            http_port,
            database_url,
            jwt_secret,
            token_expiry_hours,
        })
    }

    /// One-line startup summary, with the secret elided
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} database={} token_expiry={}h",
            self.http_port, self.database_url, self.token_expiry_hours
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_elides_secret() {
        let config = ServerConfig {
            http_port: 8081,
            database_url: "sqlite::memory:".to_owned(),
            jwt_secret: "super-secret".to_owned(),
            token_expiry_hours: 24,
        };
        assert!(!config.summary().contains("super-secret"));
    }
}
