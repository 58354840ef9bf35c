// ABOUTME: JWT-based session management and password hashing
// ABOUTME: Handles token generation, validation, and bcrypt credential verification
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Authentication and Session Management
//!
//! Sessions are carried as HS256 `JWT`s signed with a shared server
//! secret and delivered to browsers in an `HttpOnly` cookie. Claims are
//! validated on every request; the user id inside a verified token is
//! still re-resolved against the users table by the favorites routes, so
//! a deleted user cannot keep acting through a live token.

use crate::errors::{AppError, AppResult};
use crate::models::{User, UserRole};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// `JWT` claims for user sessions
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id (stringified)
    pub sub: String,
    /// Username, for log context
    pub username: String,
    /// Role at the time the token was issued
    pub role: UserRole,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Identity resolved from a verified session token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User id from the token subject
    pub user_id: i64,
    /// Username from the token
    pub username: String,
    /// Role from the token
    pub role: UserRole,
}

/// Authentication manager for `JWT` session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager from the shared secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Session lifetime in seconds, for cookie `Max-Age`
    #[must_use]
    pub const fn expiry_seconds(&self) -> i64 {
        self.token_expiry_hours * 3600
    }

    /// Generate a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT` encoding fails.
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))
    }

    /// Validate a session token and extract the caller's identity
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is invalid, the token has
    /// expired, or the claims are malformed.
    pub fn validate_token(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::auth_expired(),
                _ => AppError::auth_invalid(format!("Invalid session token: {e}")),
            }
        })?;

        let user_id = data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::auth_invalid("Malformed token subject"))?;

        Ok(AuthenticatedUser {
            user_id,
            username: data.claims.username,
            role: data.claims.role,
        })
    }
}

/// Hash a password with bcrypt at the default cost
///
/// # Errors
///
/// Returns an error if bcrypt hashing fails.
pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against a stored bcrypt hash
///
/// Runs on the blocking pool: bcrypt is deliberately slow and must not
/// stall the async executor.
///
/// # Errors
///
/// Returns an error if the verification task fails or the stored hash
/// is malformed.
pub async fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password verification error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn test_user() -> User {
        User {
            id: 42,
            username: "gwen".into(),
            password_hash: String::new(),
            role: UserRole::Expert,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let manager = AuthManager::new(b"test-secret", 24);
        let token = manager.generate_token(&test_user()).unwrap();

        let identity = manager.validate_token(&token).unwrap();
        assert_eq!(identity.user_id, 42);
        assert_eq!(identity.username, "gwen");
        assert_eq!(identity.role, UserRole::Expert);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let issuer = AuthManager::new(b"secret-a", 24);
        let verifier = AuthManager::new(b"secret-b", 24);

        let token = issuer.generate_token(&test_user()).unwrap();
        let err = verifier.validate_token(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = AuthManager::new(b"test-secret", -1);
        let token = manager.generate_token(&test_user()).unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthExpired);
    }

    #[tokio::test]
    async fn test_password_hash_and_verify() {
        let hash = hash_password("caerphilly").unwrap();
        assert!(verify_password("caerphilly", &hash).await.unwrap());
        assert!(!verify_password("stilton", &hash).await.unwrap());
    }
}
