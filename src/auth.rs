// ABOUTME: JWT issuing and validation plus bcrypt password verification
// ABOUTME: Tokens are HS256 with a configurable expiry, claims mirror the login response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! # Authentication
//!
//! Stateless bearer-token auth. Login verifies the bcrypt hash stored on the
//! user record and issues an HS256 JWT carrying the user's identity and
//! organization scope. Failed logins return a single generic message with no
//! hint about which credential was wrong.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::User;

/// JWT claims for API access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "organizationId")]
    pub organization_id: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// Issues and validates access tokens for one signing secret.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl AuthManager {
    #[must_use]
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    /// Issue a signed token for an authenticated user.
    ///
    /// # Errors
    /// Returns an internal error when signing fails.
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: serde_json::to_value(user.role)
                .ok()
                .and_then(|v| v.as_str().map(str::to_owned))
                .unwrap_or_else(|| "agent".to_owned()),
            organization_id: user.organization_id.clone(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal("Failed to sign token").with_source(e))
    }

    /// Validate a bearer token and return its claims.
    ///
    /// # Errors
    /// Returns `AuthInvalid` for expired, malformed, or mis-signed tokens.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::auth_invalid("Invalid or expired token"))
    }
}

/// Check a plaintext password against a stored bcrypt hash. A malformed hash
/// counts as a failed match rather than an error.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Utc;

    fn demo_user() -> User {
        User {
            id: "user_1".into(),
            email: "admin@calldesk.io".into(),
            password_hash: bcrypt::hash("Admin@123", 4).unwrap(),
            first_name: "Demo".into(),
            last_name: "Admin".into(),
            role: Role::SuperAdmin,
            organization_id: "org_demo".into(),
            organization_name: "Calldesk Demo".into(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trip_preserves_identity() {
        let auth = AuthManager::new("test-secret", 24);
        let user = demo_user();
        let token = auth.generate_token(&user).unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user_1");
        assert_eq!(claims.email, "admin@calldesk.io");
        assert_eq!(claims.role, "super_admin");
        assert_eq!(claims.organization_id, "org_demo");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let auth = AuthManager::new("secret-a", 24);
        let other = AuthManager::new("secret-b", 24);
        let token = auth.generate_token(&demo_user()).unwrap();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let auth = AuthManager::new("test-secret", 24);
        assert!(auth.validate_token("not.a.token").is_err());
    }

    #[test]
    fn password_verification() {
        let hash = bcrypt::hash("S3cure!pass", 4).unwrap();
        assert!(verify_password("S3cure!pass", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("S3cure!pass", "not-a-hash"));
    }
}
