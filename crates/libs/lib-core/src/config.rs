//! # Application Configuration
//!
//! Configuration is loaded from environment variables once at startup into an
//! immutable [`Config`] value and passed explicitly to everything that needs
//! it. There is no ambient configuration accessor; the signing secret in
//! particular only ever reaches the token code as an argument.

use lib_utils::envs::{get_env, get_env_parse_or};
use std::env;

use crate::error::AppError;

/// TTL applied when `TOKEN_TTL_MINUTES` is unset or unparseable.
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for token signing and verification.
    ///
    /// **Must be at least 32 characters long.** Absence is a fatal startup
    /// condition: nothing that signs or validates runs without it.
    pub jwt_secret: String,

    /// Issued-token validity period in minutes.
    pub token_ttl_minutes: i64,

    /// Frontend page that consumes password-reset tokens; the signed token is
    /// appended as a `token` query parameter.
    pub reset_base_url: String,

    /// Endpoint of the external notification service.
    pub notification_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:data/users.db".to_string());

        let jwt_secret = get_env("JWT_SECRET")
            .map_err(|_| AppError::Config("JWT_SECRET must be set in environment".to_string()))?;

        // An unset or malformed TTL falls back rather than failing startup.
        let token_ttl_minutes =
            get_env_parse_or("TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES);

        let reset_base_url = env::var("RESET_BASE_URL")
            .unwrap_or_else(|_| "https://app.recipehub.example/create-new-password".to_string());

        let notification_url = env::var("NOTIFICATION_URL").unwrap_or_else(|_| {
            "https://notifications.recipehub.example/api/v1/notifications/send".to_string()
        });

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl_minutes,
            reset_base_url,
            notification_url,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.len() < 32 {
            return Err(AppError::Config(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        if self.token_ttl_minutes < 1 || self.token_ttl_minutes > 1440 {
            return Err(AppError::Config(
                "TOKEN_TTL_MINUTES must be between 1 and 1440 (24 hours)".to_string(),
            ));
        }

        if !self.reset_base_url.starts_with("http") {
            return Err(AppError::Config(
                "RESET_BASE_URL must be an absolute http(s) URL".to_string(),
            ));
        }

        if !self.notification_url.starts_with("http") {
            return Err(AppError::Config(
                "NOTIFICATION_URL must be an absolute http(s) URL".to_string(),
            ));
        }

        Ok(())
    }
}
