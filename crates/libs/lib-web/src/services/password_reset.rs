//! # Password Reset Flow
//!
//! Issues reset-scoped signed tokens, delivers them as links through the
//! notification service, and later consumes a submitted token to rotate the
//! user's credential.
//!
//! Reset tokens are single-use: consumption invalidates the stored token, and
//! a replayed token is rejected even though its signature still verifies.

use lib_auth::token::{decode_token, issue_token, TokenKind};
use lib_core::model::store::{TokenRepository, UserRepository};
use lib_core::{AppError, Config, DbPool, Result};
use lib_utils::validation::{validate_min_length, validate_not_empty};
use std::collections::HashMap;
use tracing::{info, warn};

use super::notify::{NotificationClient, NotificationRequest};
use super::hash_new_password;

/// Template identifier understood by the notification service.
const RESET_TEMPLATE: &str = "PasswordReset";
const RESET_SUBJECT: &str = "Password Reset Request";

pub struct PasswordResetFlow;

impl PasswordResetFlow {
    /// Issue a reset-scoped token for `user_id`, persist it, and return the
    /// URL the user will follow.
    pub async fn generate_reset_link(
        pool: &DbPool,
        config: &Config,
        user_id: i64,
        ttl_minutes: i64,
    ) -> Result<String> {
        let issued = issue_token(
            user_id,
            TokenKind::PasswordReset,
            &config.jwt_secret,
            ttl_minutes,
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

        Ok(format!(
            "{}?token={}",
            config.reset_base_url,
            urlencoding::encode(&issued.value)
        ))
    }

    /// Look up the account for `email`, issue a reset link, and hand it to
    /// the notification service.
    ///
    /// Delivery is part of the contract: a failed or unacknowledged
    /// notification surfaces as `Dependency`, so a reset token is never
    /// issued silently with the user left uninformed. Returns the link for
    /// callers that need it (tests, admin tooling).
    pub async fn forgot_password(
        pool: &DbPool,
        config: &Config,
        notifier: &NotificationClient,
        email: &str,
    ) -> Result<String> {
        let user = UserRepository::find_by_email(pool, email)
            .await?
            .ok_or_else(|| {
                warn!("[RESET] Reset requested for unknown email");
                AppError::NotFound("User not found".to_string())
            })?;

        let link =
            Self::generate_reset_link(pool, config, user.user_id, config.token_ttl_minutes).await?;

        let mut template_data = HashMap::new();
        template_data.insert("ResetLink".to_string(), link.clone());

        notifier
            .send(&NotificationRequest {
                name: user.name,
                email: email.to_string(),
                subject: RESET_SUBJECT.to_string(),
                template_type: RESET_TEMPLATE.to_string(),
                template_data,
            })
            .await?;

        info!("[RESET] Reset link delivered for user {}", user.user_id);
        Ok(link)
    }

    /// Consume a submitted reset token and rotate the user's credential.
    ///
    /// Order matters: the new password is validated before the stored token
    /// is burned, so a typo does not cost the user their reset link.
    pub async fn consume_reset_token(
        pool: &DbPool,
        config: &Config,
        token: &str,
        new_password: &str,
    ) -> Result<()> {
        let claims =
            decode_token(token, &config.jwt_secret).map_err(|_| AppError::InvalidToken)?;

        // An access token must not rotate credentials, however valid.
        if claims.kind != TokenKind::PasswordReset {
            warn!("[RESET] Token of kind '{}' submitted to reset", claims.kind);
            return Err(AppError::InvalidToken);
        }

        let user_id = claims.subject_id().map_err(|_| AppError::InvalidToken)?;

        validate_not_empty(new_password, "New password").map_err(AppError::Validation)?;
        validate_min_length(new_password, 8, "New password").map_err(AppError::Validation)?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        // Single use: exactly one consumption wins; replays land here.
        if !TokenRepository::invalidate(pool, token).await? {
            warn!("[RESET] Replayed or unknown reset token for user {}", user_id);
            return Err(AppError::InvalidToken);
        }

        let (password_hash, password_salt) = hash_new_password(new_password.to_string()).await?;
        UserRepository::update_credentials(pool, user.user_id, &password_hash, &password_salt)
            .await?;

        info!("[RESET] Credential rotated for user {}", user.user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CredentialService;
    use crate::test_support::{
        register_request, setup_test_db, spawn_notification_stub, test_config,
    };
    use axum::http::StatusCode;
    use lib_auth::pwd;
    use lib_core::dto::LoginRequest;
    use lib_core::model::store::models::UserToken;

    async fn register_alice(pool: &DbPool) -> i64 {
        CredentialService::register(pool, register_request("Alice", "alice@x.com", "Secret1!"))
            .await
            .unwrap();
        UserRepository::find_by_email(pool, "alice@x.com")
            .await
            .unwrap()
            .unwrap()
            .user_id
    }

    fn token_from_link(link: &str) -> String {
        let encoded = link.split("token=").nth(1).expect("link should carry a token");
        urlencoding::decode(encoded).unwrap().into_owned()
    }

    #[tokio::test]
    async fn test_generate_reset_link_persists_reset_token() {
        let pool = setup_test_db().await;
        let config = test_config();
        let user_id = register_alice(&pool).await;

        let link = PasswordResetFlow::generate_reset_link(&pool, &config, user_id, 60)
            .await
            .unwrap();

        assert!(link.starts_with(&config.reset_base_url));
        assert!(link.contains("?token="));

        let token = token_from_link(&link);
        let row = sqlx::query_as::<_, UserToken>(
            "SELECT * FROM user_tokens WHERE access_token = ?",
        )
        .bind(&token)
        .fetch_one(&pool)
        .await
        .expect("reset token should be stored");

        assert_eq!(row.user_id, user_id);
        assert_eq!(row.token_type, "password-reset");
        assert!(!row.is_invalid);
    }

    #[tokio::test]
    async fn test_forgot_password_notifies_with_reset_link() {
        let pool = setup_test_db().await;
        let mut config = test_config();
        let (endpoint, received) = spawn_notification_stub(StatusCode::OK).await;
        config.notification_url = endpoint.clone();
        let notifier = NotificationClient::new(endpoint);

        register_alice(&pool).await;

        let link =
            PasswordResetFlow::forgot_password(&pool, &config, &notifier, "alice@x.com")
                .await
                .expect("forgot-password should succeed");

        let requests = received.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.name, "Alice");
        assert_eq!(request.email, "alice@x.com");
        assert_eq!(request.subject, "Password Reset Request");
        assert_eq!(request.template_type, "PasswordReset");
        assert_eq!(request.template_data.get("ResetLink"), Some(&link));
    }

    #[tokio::test]
    async fn test_forgot_password_unknown_email() {
        let pool = setup_test_db().await;
        let config = test_config();
        let (endpoint, received) = spawn_notification_stub(StatusCode::OK).await;
        let notifier = NotificationClient::new(endpoint);

        let result =
            PasswordResetFlow::forgot_password(&pool, &config, &notifier, "nobody@x.com").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        // Nothing was sent for an unknown account.
        assert!(received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_forgot_password_delivery_failure_is_dependency_error() {
        let pool = setup_test_db().await;
        let config = test_config();
        let (endpoint, _) = spawn_notification_stub(StatusCode::INTERNAL_SERVER_ERROR).await;
        let notifier = NotificationClient::new(endpoint);

        register_alice(&pool).await;

        let result =
            PasswordResetFlow::forgot_password(&pool, &config, &notifier, "alice@x.com").await;

        assert!(matches!(result, Err(AppError::Dependency(_))));
    }

    #[tokio::test]
    async fn test_consume_reset_token_rotates_credential() {
        let pool = setup_test_db().await;
        let config = test_config();
        let user_id = register_alice(&pool).await;

        let link = PasswordResetFlow::generate_reset_link(&pool, &config, user_id, 60)
            .await
            .unwrap();
        let token = token_from_link(&link);

        PasswordResetFlow::consume_reset_token(&pool, &config, &token, "NewSecret1!")
            .await
            .expect("reset should succeed");

        let user = UserRepository::find_by_id(&pool, user_id).await.unwrap().unwrap();
        assert!(pwd::verify_password("NewSecret1!", &user.password_hash, &user.password_salt)
            .unwrap());
        assert!(!pwd::verify_password("Secret1!", &user.password_hash, &user.password_salt)
            .unwrap());

        // Login works with the rotated credential.
        let (_, issued) = CredentialService::login(
            &pool,
            &config,
            LoginRequest {
                email: "alice@x.com".to_string(),
                password: "NewSecret1!".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(issued.user_id, user_id);
    }

    #[tokio::test]
    async fn test_consume_reset_token_is_single_use() {
        let pool = setup_test_db().await;
        let config = test_config();
        let user_id = register_alice(&pool).await;

        let link = PasswordResetFlow::generate_reset_link(&pool, &config, user_id, 60)
            .await
            .unwrap();
        let token = token_from_link(&link);

        PasswordResetFlow::consume_reset_token(&pool, &config, &token, "NewSecret1!")
            .await
            .unwrap();

        // Replay: signature still verifies, but the stored token is spent.
        let result =
            PasswordResetFlow::consume_reset_token(&pool, &config, &token, "Another1!x").await;
        assert!(matches!(result, Err(AppError::InvalidToken)));

        // The first rotation stands.
        let user = UserRepository::find_by_id(&pool, user_id).await.unwrap().unwrap();
        assert!(pwd::verify_password("NewSecret1!", &user.password_hash, &user.password_salt)
            .unwrap());
    }

    #[tokio::test]
    async fn test_consume_rejects_access_tokens() {
        let pool = setup_test_db().await;
        let config = test_config();
        register_alice(&pool).await;

        let (_, token) = CredentialService::login(
            &pool,
            &config,
            LoginRequest {
                email: "alice@x.com".to_string(),
                password: "Secret1!".to_string(),
            },
        )
        .await
        .unwrap();

        let result = PasswordResetFlow::consume_reset_token(
            &pool,
            &config,
            &token.access_token,
            "NewSecret1!",
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidToken)));
        // The access token is untouched by the rejected attempt.
        assert!(
            TokenRepository::is_valid(&pool, token.user_id, &token.access_token)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_consume_rejects_weak_password_without_burning_token() {
        let pool = setup_test_db().await;
        let config = test_config();
        let user_id = register_alice(&pool).await;

        let link = PasswordResetFlow::generate_reset_link(&pool, &config, user_id, 60)
            .await
            .unwrap();
        let token = token_from_link(&link);

        let result =
            PasswordResetFlow::consume_reset_token(&pool, &config, &token, "short").await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        // The link still works after the rejected attempt.
        PasswordResetFlow::consume_reset_token(&pool, &config, &token, "NewSecret1!")
            .await
            .expect("token should remain usable");
    }

    #[tokio::test]
    async fn test_consume_rejects_tampered_token() {
        let pool = setup_test_db().await;
        let config = test_config();

        let result =
            PasswordResetFlow::consume_reset_token(&pool, &config, "not-a-jwt", "NewSecret1!")
                .await;
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_consume_for_deleted_user() {
        let pool = setup_test_db().await;
        let config = test_config();
        let user_id = register_alice(&pool).await;

        let link = PasswordResetFlow::generate_reset_link(&pool, &config, user_id, 60)
            .await
            .unwrap();
        let token = token_from_link(&link);

        UserRepository::delete(&pool, user_id).await.unwrap();

        let result =
            PasswordResetFlow::consume_reset_token(&pool, &config, &token, "NewSecret1!").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
