//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used
//! consistently across the service and handler layers. It follows the
//! `thiserror` pattern for ergonomic error handling.
//!
//! Every failure an operation can produce is one of these variants; nothing
//! escapes to callers as an unstructured panic or a raw library error. The
//! mapping from variant to HTTP status lives here so the handler layer stays
//! mechanical.

use thiserror::Error;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all failure scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input (empty password, mismatched confirmation).
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Registration conflict: the email address is already taken.
    ///
    /// **HTTP Status**: 409 Conflict
    #[error("The email address is already registered")]
    DuplicateEmail,

    /// Requested user or record does not exist.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Password verification failed.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token failed signature/expiry validation, or a single-use token was
    /// replayed.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Missing or invalid configuration. Fatal at startup, never recoverable
    /// per-request.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The notification collaborator was unreachable or did not acknowledge.
    ///
    /// **HTTP Status**: 502 Bad Gateway
    #[error("Dependency failure: {0}")]
    Dependency(String),

    /// Database or other unexpected internal failure.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::BAD_REQUEST,
            AppError::Dependency(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-facing error message.
    ///
    /// Internal detail never crosses the boundary; it goes to the log instead.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::DuplicateEmail => "The email address is already registered".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::InvalidToken => "Invalid or expired token".to_string(),
            AppError::Dependency(_) => "A downstream service is unavailable".to_string(),
            AppError::Config(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::DuplicateEmail => "DuplicateEmail",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::InvalidToken => "InvalidToken",
            AppError::Config(_) => "Config",
            AppError::Dependency(_) => "Dependency",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => {
                tracing::error!("Server error: {}", self);
            }
            _ => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}
