//! # Authentication Handlers
//!
//! HTTP endpoints for registration, login, and logout.

use axum::{
    extract::{Json, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
};
use lib_core::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use lib_core::{AppError, Config, DbPool};
use tracing::{info, instrument};

use crate::services::{CredentialService, SessionService};

/// Extract the bearer token from an Authorization header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Register handler - creates a new user account.
///
/// Returns `201 Created` on success; `409 Conflict` when the email is
/// already registered. No token is issued; the client logs in afterwards.
#[instrument(skip(pool, req), fields(email = %req.email))]
pub async fn register(
    State(pool): State<DbPool>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    info!("[REGISTER] New user registration request");

    CredentialService::register(&pool, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login handler - authenticates an existing user.
///
/// Returns the display-name greeting and the freshly issued access token.
/// `404` for an unknown email, `401` for a wrong password.
#[instrument(skip(pool, config, req), fields(email = %req.email))]
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (name, token) = CredentialService::login(&pool, &config, req).await?;

    Ok(Json(LoginResponse {
        message: format!("Welcome back, {}!", name),
        token,
    }))
}

/// Logout handler - invalidates the presented bearer token.
///
/// Reaches here only through the auth middleware, so the header is present
/// and the token was valid moments ago; a `400` response means it was
/// already invalidated in the meantime (idempotent-invalidation contract).
pub async fn logout(
    State(pool): State<DbPool>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| AppError::Validation("Authorization token is required".to_string()))?;

    if SessionService::logout(&pool, token).await? {
        Ok(Json(MessageResponse {
            message: "You have been successfully logged out".to_string(),
        }))
    } else {
        Err(AppError::Validation(
            "Logout failed: token could not be invalidated".to_string(),
        ))
    }
}
