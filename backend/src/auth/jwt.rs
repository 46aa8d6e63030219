//! JWT token generation and validation
//!
//! Tokens are stateless bearer credentials carrying the username as the
//! `sub` claim, signed with a single server-held HMAC secret.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use movie_review_shared::AuthError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Claims as they appear on the wire
///
/// `sub` is optional here so that a token without a subject is reported
/// as such instead of as a generic decoding failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    /// Expiration time (Unix timestamp)
    exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    iat: i64,
}

/// Claims of a token that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username of the bearer
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
///
/// Keys are derived once and shared behind `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new(secret: &str, algorithm: Algorithm, ttl_minutes: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            algorithm,
            default_ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issue a token for `username`, expiring after `ttl` or the configured default
    pub fn issue(&self, username: &str, ttl: Option<Duration>) -> Result<String> {
        let now = Utc::now();
        let exp = now + ttl.unwrap_or(self.default_ttl);

        let claims = TokenClaims {
            sub: Some(username.to_string()),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to generate access token: {}", e))
    }

    /// Validate signature, algorithm and expiry, and require a subject
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<TokenClaims>(token, self.keys.decoding(), &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        let TokenClaims { sub, exp, iat } = token_data.claims;
        let sub = sub
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingSubject)?;

        Ok(Claims { sub, exp, iat })
    }

    /// Default token lifetime in seconds
    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.default_ttl.num_seconds()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}
