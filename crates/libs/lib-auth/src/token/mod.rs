//! # Signed Token Management
//!
//! Issuance and validation of HMAC-SHA256 signed tokens (JWTs) carrying a
//! subject claim and an absolute expiry.
//!
//! Access tokens and password-reset tokens come from the same signer, so the
//! token kind is part of the signed claim set: a reset token can never be
//! replayed as an access token, and vice versa.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lib_utils::time::now_utc;

/// TTL applied when no explicit value is configured.
pub const DEFAULT_TTL_MINUTES: i64 = 60;

/// Token kind, embedded in the signed claims and recorded alongside the
/// persisted token row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Access,
    PasswordReset,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::PasswordReset => write!(f, "password-reset"),
        }
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenKind::Access),
            "password-reset" => Ok(TokenKind::PasswordReset),
            _ => Err(format!("Invalid token kind: {}", s)),
        }
    }
}

/// Signed claim set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id, as a string per JWT convention)
    pub sub: String,
    /// Token kind
    pub kind: TokenKind,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject claim back into a user id.
    pub fn subject_id(&self) -> Result<i64, TokenError> {
        self.sub.parse::<i64>().map_err(|_| TokenError::Invalid)
    }
}

/// A freshly signed token together with its issuance metadata.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub user_id: i64,
    pub value: String,
    pub expires_at: DateTime<Utc>,
    pub kind: TokenKind,
}

/// Token errors.
///
/// `Expired` is an expected outcome, not an exceptional one; callers on
/// request paths treat both variants uniformly as "reject".
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Token encoding error: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Sign a token for `user_id` expiring `ttl_minutes` from now.
///
/// The signing secret is process-wide configuration; callers pass it in
/// explicitly rather than reading ambient state.
pub fn issue_token(
    user_id: i64,
    kind: TokenKind,
    secret: &str,
    ttl_minutes: i64,
) -> Result<IssuedToken, TokenError> {
    let now = now_utc();
    let expires_at = now + Duration::minutes(ttl_minutes);

    let claims = Claims {
        sub: user_id.to_string(),
        kind,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let value = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(IssuedToken {
        user_id,
        value,
        expires_at,
        kind,
    })
}

/// Verify signature and expiry, returning the claims on success.
///
/// No clock leeway: a token past its `exp` is rejected immediately.
pub fn decode_token(value: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        value,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}
