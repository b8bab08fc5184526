//! # Profile Handlers
//!
//! Authenticated self-service endpoints. The caller's identity comes from
//! the `Claims` injected by the auth middleware, never from the request body.

use axum::extract::{Extension, Json, State};
use lib_auth::token::Claims;
use lib_core::dto::{ChangePasswordRequest, MessageResponse, UpdateProfileRequest};
use lib_core::{AppError, DbPool};

use crate::services::ProfileService;

/// Change-password handler (bearer).
pub async fn change_password(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = claims.subject_id().map_err(|_| AppError::InvalidToken)?;

    ProfileService::change_password(&pool, user_id, req).await?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

/// Update-profile handler (bearer).
pub async fn update_profile(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = claims.subject_id().map_err(|_| AppError::InvalidToken)?;

    ProfileService::update_profile(&pool, user_id, req).await?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}
