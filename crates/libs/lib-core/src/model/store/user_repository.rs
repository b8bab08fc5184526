//! # User Repository
//!
//! Database access layer for user records: lookup by email or id, creation,
//! credential rotation, profile updates, and deletion.
//!
//! Repositories take and return plain data records; nothing here tracks
//! entity state across calls.

use super::DbPool;
use super::models::{User, UserForCreate};
use lib_utils::time::now_utc;
use sqlx::query_as;
use sqlx::types::Json;

/// User repository for database operations.
///
/// All methods are async and return `Result` types; callers map
/// `sqlx::Error` into the application error taxonomy.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by their email address (exact match, no normalization).
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &DbPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new user record.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `user_data` - New user fields; password already hashed and salted
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The newly created user with generated id and creation
    ///   timestamp
    /// * `Err(sqlx::Error)` - Database error (e.g. UNIQUE violation when the
    ///   email is already registered)
    pub async fn create(pool: &DbPool, user_data: UserForCreate) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash, password_salt, diet_preferences, favorite_cuisines, date_created) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user_data.name)
        .bind(&user_data.email)
        .bind(&user_data.password_hash)
        .bind(&user_data.password_salt)
        .bind(Json(&user_data.diet_preferences))
        .bind(Json(&user_data.favorite_cuisines))
        .bind(now_utc())
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE user_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Replace a user's credential pair.
    ///
    /// The single write path for `password_hash`/`password_salt`: both
    /// columns change in one statement, never independently.
    pub async fn update_credentials(
        pool: &DbPool,
        user_id: i64,
        password_hash: &str,
        password_salt: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = ?, password_salt = ? WHERE user_id = ?")
            .bind(password_hash)
            .bind(password_salt)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update profile fields (name and preference lists).
    ///
    /// Callers resolve any merge-with-existing semantics before calling; this
    /// writes exactly what it is given.
    pub async fn update_profile(
        pool: &DbPool,
        user_id: i64,
        name: &str,
        diet_preferences: &[String],
        favorite_cuisines: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET name = ?, diet_preferences = ?, favorite_cuisines = ? WHERE user_id = ?",
        )
        .bind(name)
        .bind(Json(diet_preferences))
        .bind(Json(favorite_cuisines))
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a user record. Returns whether a row was removed.
    pub async fn delete(pool: &DbPool, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
