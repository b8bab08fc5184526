//! # Profile Service
//!
//! Authenticated self-service operations: password change, profile update,
//! and account deletion. Every credential-touching operation re-verifies the
//! caller's current password.

use lib_core::dto::{ChangePasswordRequest, UpdateProfileRequest};
use lib_core::model::store::UserRepository;
use lib_core::{AppError, DbPool, Result};
use lib_utils::validation::{validate_min_length, validate_not_empty};
use tracing::{info, warn};

use super::{hash_new_password, verify_stored_password};

pub struct ProfileService;

impl ProfileService {
    /// Change the caller's password.
    ///
    /// Requires the current password to verify; the replacement is hashed
    /// with a freshly generated salt.
    pub async fn change_password(
        pool: &DbPool,
        user_id: i64,
        req: ChangePasswordRequest,
    ) -> Result<()> {
        if req.new_password != req.confirm_new_password {
            return Err(AppError::Validation(
                "New password and confirm password do not match".to_string(),
            ));
        }

        validate_not_empty(&req.current_password, "Current password")
            .map_err(AppError::Validation)?;
        validate_min_length(&req.new_password, 8, "New password").map_err(AppError::Validation)?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let verified = verify_stored_password(
            req.current_password,
            user.password_hash.clone(),
            user.password_salt.clone(),
        )
        .await?;

        if !verified {
            warn!("[PROFILE] Wrong current password for user {}", user_id);
            return Err(AppError::InvalidCredentials);
        }

        let (password_hash, password_salt) = hash_new_password(req.new_password).await?;
        UserRepository::update_credentials(pool, user_id, &password_hash, &password_salt).await?;

        info!("[PROFILE] Password changed for user {}", user_id);
        Ok(())
    }

    /// Update name and preference lists. The name is required; absent
    /// preference lists keep their stored value.
    pub async fn update_profile(
        pool: &DbPool,
        user_id: i64,
        req: UpdateProfileRequest,
    ) -> Result<()> {
        validate_not_empty(&req.name, "Name").map_err(AppError::Validation)?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let diet_preferences = req.diet_preferences.unwrap_or(user.diet_preferences.0);
        let favorite_cuisines = req.favorite_cuisines.unwrap_or(user.favorite_cuisines.0);

        UserRepository::update_profile(
            pool,
            user_id,
            &req.name,
            &diet_preferences,
            &favorite_cuisines,
        )
        .await?;
        Ok(())
    }

    /// Delete the caller's account after verifying their password.
    pub async fn delete_account(pool: &DbPool, user_id: i64, password: &str) -> Result<()> {
        validate_not_empty(password, "Password").map_err(AppError::Validation)?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let verified = verify_stored_password(
            password.to_string(),
            user.password_hash.clone(),
            user.password_salt.clone(),
        )
        .await?;

        if !verified {
            warn!("[PROFILE] Wrong password on delete-account for user {}", user_id);
            return Err(AppError::InvalidCredentials);
        }

        UserRepository::delete(pool, user_id).await?;
        info!("[PROFILE] Account {} deleted", user_id);
        Ok(())
    }
}
