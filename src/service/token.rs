//! Token Service
//!
//! Issues and validates the signed bearer tokens that protect the candidate
//! endpoints. Tokens are HS256 JWTs carrying the identity's email as the
//! subject and an absolute expiry timestamp.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::error::AppError;

/// Errors that can occur during token operations
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token has expired")]
    Expired,
    #[error("Token generation failed")]
    TokenGeneration,
}

impl From<AuthError> for AppError {
    fn from(_: AuthError) -> Self {
        // Callers never learn why a token was rejected.
        AppError::Unauthorized
    }
}

/// Claims carried inside an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the email of the identity the token was issued to
    pub sub: String,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

/// Service for issuing and validating access tokens
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service with the given signing secret and lifetime
    /// in minutes.
    pub fn new(secret: String, ttl_minutes: i64) -> Self {
        Self {
            secret,
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Override the token lifetime. Mainly useful for exercising expiry.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issue a signed token for the given subject.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let expiry = Utc::now() + self.ttl;
        let claims = Claims {
            sub: subject.to_string(),
            exp: expiry.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            log::error!("Failed to encode access token: {}", e);
            AuthError::TokenGeneration
        })
    }

    /// Validate a token and return the subject it was issued to.
    pub fn validate(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret".to_string(), 30)
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let service = service();
        let token = service.issue("user@example.com").unwrap();
        let subject = service.validate(&token).unwrap();
        assert_eq!(subject, "user@example.com");
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service().with_ttl(Duration::minutes(-5));
        let token = service.issue("user@example.com").unwrap();
        let err = service.validate(&token).unwrap_err();
        assert!(matches!(err, AuthError::Expired));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let err = service().validate("not-a-token").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue("user@example.com").unwrap();
        let other = TokenService::new("different-secret".to_string(), 30);
        let err = other.validate(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn test_auth_error_maps_to_unauthorized() {
        let app_err: AppError = AuthError::Expired.into();
        assert!(matches!(app_err, AppError::Unauthorized));
    }
}
