use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

/// User entity representing a complete user record from the database.
///
/// `password_hash` and `password_salt` are base64 columns (20 and 16 bytes
/// decoded). They are written together through
/// [`super::UserRepository::update_credentials`] and nowhere else, so one can
/// never go stale against the other.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub diet_preferences: Json<Vec<String>>,
    pub favorite_cuisines: Json<Vec<String>>,
    pub date_created: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password must already be hashed; plaintext never reaches the store.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub diet_preferences: Vec<String>,
    pub favorite_cuisines: Vec<String>,
}

/// Issued-token record.
///
/// Inserted on issuance (login or reset-link generation). The only mutation
/// ever applied is flipping `is_invalid` from false to true; rows are never
/// deleted by this service.
#[derive(Debug, Clone, FromRow)]
pub struct UserToken {
    pub user_token_id: i64,
    pub user_id: i64,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub is_invalid: bool,
    pub token_type: String,
}
