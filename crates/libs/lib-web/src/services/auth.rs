//! # Credential Service
//!
//! Registration and login orchestration: uniqueness check, hashing, token
//! issuance, token persistence.

use lib_auth::token::{issue_token, TokenKind};
use lib_core::dto::{LoginRequest, RegisterRequest, TokenResponse};
use lib_core::model::store::{TokenRepository, UserRepository};
use lib_core::model::store::models::UserForCreate;
use lib_core::{AppError, Config, DbPool, Result};
use lib_utils::validation::{validate_email, validate_min_length, validate_not_empty};
use tracing::{debug, info, warn};

use super::{hash_new_password, verify_stored_password};

pub struct CredentialService;

impl CredentialService {
    /// Register a new user account.
    ///
    /// The email must not already be registered (exact match). The password
    /// is salted and hashed before anything is persisted; no token is issued
    /// on registration.
    pub async fn register(pool: &DbPool, req: RegisterRequest) -> Result<()> {
        validate_not_empty(&req.name, "Name").map_err(AppError::Validation)?;
        validate_email(&req.email).map_err(AppError::Validation)?;
        validate_min_length(&req.password, 8, "Password").map_err(AppError::Validation)?;

        if req.password != req.confirm_password {
            return Err(AppError::Validation(
                "Password and confirm password do not match".to_string(),
            ));
        }

        if UserRepository::find_by_email(pool, &req.email).await?.is_some() {
            warn!("[REGISTER] Email already registered: {}", req.email);
            return Err(AppError::DuplicateEmail);
        }

        let (password_hash, password_salt) = hash_new_password(req.password).await?;

        let user = UserRepository::create(
            pool,
            UserForCreate {
                name: req.name,
                email: req.email,
                password_hash,
                password_salt,
                diet_preferences: req.diet_preferences.unwrap_or_default(),
                favorite_cuisines: req.favorite_cuisines.unwrap_or_default(),
            },
        )
        .await
        .map_err(|e| match &e {
            // Lost the race against a concurrent register with the same email.
            sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE") => {
                AppError::DuplicateEmail
            }
            _ => AppError::from(e),
        })?;

        info!("[REGISTER] User {} created", user.user_id);
        Ok(())
    }

    /// Authenticate a user and issue an access token.
    ///
    /// Returns the display name and the persisted token. Nothing is written
    /// on any failure path.
    pub async fn login(
        pool: &DbPool,
        config: &Config,
        req: LoginRequest,
    ) -> Result<(String, TokenResponse)> {
        // Absent password is a caller-contract violation, distinct from a
        // wrong one.
        validate_not_empty(&req.password, "Password").map_err(AppError::Validation)?;

        let user = UserRepository::find_by_email(pool, &req.email)
            .await?
            .ok_or_else(|| {
                warn!("[LOGIN] User not found: {}", req.email);
                AppError::NotFound("User not found".to_string())
            })?;

        let verified = verify_stored_password(
            req.password,
            user.password_hash.clone(),
            user.password_salt.clone(),
        )
        .await?;

        if !verified {
            warn!("[LOGIN] Invalid password for user {}", user.user_id);
            return Err(AppError::InvalidCredentials);
        }

        let issued = issue_token(
            user.user_id,
            TokenKind::Access,
            &config.jwt_secret,
            config.token_ttl_minutes,
        )
        .map_err(|e| AppError::Internal(format!("token issuance failed: {}", e)))?;

        TokenRepository::store(
            pool,
            issued.user_id,
            &issued.value,
            issued.expires_at,
            &issued.kind.to_string(),
        )
        .await?;

        debug!("[LOGIN] User {} authenticated", user.user_id);

        Ok((
            user.name,
            TokenResponse {
                user_id: issued.user_id,
                access_token: issued.value,
                expires_at: issued.expires_at,
                token_type: issued.kind.to_string(),
            },
        ))
    }
}
