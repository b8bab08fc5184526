//! # Token Repository
//!
//! Persistence for issued tokens: append-only inserts, validity checks, and
//! the idempotent invalidation write path.
//!
//! Rows are never deleted here; retention of expired tokens is an external
//! concern.

use super::DbPool;
use super::models::UserToken;
use chrono::{DateTime, Utc};
use lib_utils::time::now_utc;
use sqlx::query_as;

/// Token repository for database operations.
pub struct TokenRepository;

impl TokenRepository {
    /// Persist a freshly issued token. Append-only.
    pub async fn store(
        pool: &DbPool,
        user_id: i64,
        access_token: &str,
        expires_at: DateTime<Utc>,
        token_type: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_tokens (user_id, access_token, expires_at, token_type) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(access_token)
        .bind(expires_at)
        .bind(token_type)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Check whether a token is currently usable for `user_id`.
    ///
    /// True iff a record matches (user_id, value), has not been invalidated,
    /// and has not expired. A missing record, an expired record, and an
    /// invalidated record are indistinguishable to the caller.
    pub async fn is_valid(
        pool: &DbPool,
        user_id: i64,
        access_token: &str,
    ) -> Result<bool, sqlx::Error> {
        let token = query_as::<_, UserToken>(
            "SELECT * FROM user_tokens WHERE user_id = ? AND access_token = ?",
        )
        .bind(user_id)
        .bind(access_token)
        .fetch_optional(pool)
        .await?;

        Ok(matches!(token, Some(t) if !t.is_invalid && t.expires_at > now_utc()))
    }

    /// Invalidate a token by value.
    ///
    /// Single conditional UPDATE keyed by the token value, so concurrent
    /// calls on the same value transition at most one row: exactly one caller
    /// observes `true`, every other caller (and every later call) gets
    /// `false`. Unknown values also return `false` rather than an error.
    pub async fn invalidate(pool: &DbPool, access_token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_tokens SET is_invalid = 1 WHERE access_token = ? AND is_invalid = 0",
        )
        .bind(access_token)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
