// ABOUTME: JWT session tokens and bcrypt password handling
// ABOUTME: HS256 tokens carry the user ID and expire after a configured window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPet

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Login email, for log correlation
    pub email: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Issues and validates session tokens
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl AuthManager {
    /// Create a manager from the shared signing secret
    #[must_use]
    pub fn new(secret: &[u8], expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry_hours,
        }
    }

    /// Issue a session token for a user
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::auth_expired(),
                _ => AppError::auth_invalid("Invalid token"),
            })
    }

    /// Validate a token and parse the subject as a user ID
    pub fn user_id_from_token(&self, token: &str) -> AppResult<Uuid> {
        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| AppError::auth_invalid("Invalid token subject"))
    }
}

/// Hash a password for storage
pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check a login password against the stored hash
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))
}

/// Pull the bearer token out of an Authorization header value
pub fn extract_bearer(header_value: &str) -> AppResult<&str> {
    header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::auth_invalid("Authorization header must use Bearer scheme"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new("runner@example.com".to_owned(), "hash".to_owned(), None)
    }

    #[test]
    fn test_token_round_trip() {
        let manager = AuthManager::new(b"test-secret", 24);
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        let parsed = manager.user_id_from_token(&token).unwrap();
        assert_eq!(parsed, user.id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = AuthManager::new(b"test-secret", 24);
        let other = AuthManager::new(b"other-secret", 24);
        let token = manager.generate_token(&test_user()).unwrap();

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = AuthManager::new(b"test-secret", -1);
        let token = manager.generate_token(&test_user()).unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        assert_eq!(
            err.code,
            crate::errors::ErrorCode::AuthExpired,
            "expected expiry error, got: {err}"
        );
    }

    #[test]
    fn test_bearer_extraction() {
        assert_eq!(extract_bearer("Bearer abc").unwrap(), "abc");
        assert!(extract_bearer("Basic abc").is_err());
    }

    #[test]
    fn test_password_hashing() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }
}
