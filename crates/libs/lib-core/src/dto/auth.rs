//! # Authentication Data Transfer Objects
//!
//! Shapes for registration, login, logout, and the password-reset endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `POST /api/v1/auth/register` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub diet_preferences: Option<Vec<String>>,
    #[serde(default)]
    pub favorite_cuisines: Option<Vec<String>>,
}

/// `POST /api/v1/auth/login` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// An issued token as returned to the client and recorded in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub user_id: i64,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub token_type: String,
}

/// Successful login: greeting plus the freshly issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: TokenResponse,
}

/// `POST /api/v1/users/forgot-password` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// `PATCH /api/v1/users/reset` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Generic success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error envelope emitted by `AppError::into_response`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
