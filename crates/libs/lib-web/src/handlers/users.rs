//! # User Handlers
//!
//! Public user lookup, the password-reset endpoints, and account deletion.

use axum::extract::{Extension, Json, Path, State};
use lib_auth::token::Claims;
use lib_core::dto::{
    DeleteAccountRequest, ForgotPasswordRequest, MessageResponse, ResetPasswordRequest,
    UserResponse,
};
use lib_core::model::store::UserRepository;
use lib_core::{AppError, Config, DbPool};
use tracing::{info, instrument};

use crate::server::AppState;
use crate::services::{PasswordResetFlow, ProfileService};

/// Public view of a user record.
pub async fn get_user(
    State(pool): State<DbPool>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserRepository::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        name: user.name,
        email: user.email,
        diet_preferences: user.diet_preferences.0,
        favorite_cuisines: user.favorite_cuisines.0,
    }))
}

/// Forgot-password handler.
///
/// Responds identically whether or not the address is registered, so an
/// unauthenticated caller cannot probe for accounts. A delivery failure is
/// still surfaced (502): the user must know the link is not coming.
#[instrument(skip(state, req))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    info!("[RESET] Password reset requested");

    match PasswordResetFlow::forgot_password(&state.db, &state.config, &state.notifier, &req.email)
        .await
    {
        Ok(_) | Err(AppError::NotFound(_)) => Ok(Json(MessageResponse {
            message: "If that email address is registered, a password reset link has been sent"
                .to_string(),
        })),
        Err(e) => Err(e),
    }
}

/// Reset-password handler - consumes a reset token from the emailed link.
pub async fn reset_password(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.new_password != req.confirm_password {
        return Err(AppError::Validation(
            "The password and confirmation password do not match".to_string(),
        ));
    }

    PasswordResetFlow::consume_reset_token(&pool, &config, &req.token, &req.new_password).await?;

    Ok(Json(MessageResponse {
        message: "Password has been reset successfully".to_string(),
    }))
}

/// Delete-account handler (bearer). The caller confirms with their password.
pub async fn delete_account(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<DeleteAccountRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = claims.subject_id().map_err(|_| AppError::InvalidToken)?;

    ProfileService::delete_account(&pool, user_id, &req.password).await?;

    Ok(Json(MessageResponse {
        message: "Account successfully deleted".to_string(),
    }))
}
