//! # Services
//!
//! Business logic for the credential and token lifecycle. Handlers stay
//! mechanical; everything with a failure mode worth testing lives here.
//!
//! ## Modules
//!
//! - **[`auth`]**: registration and login orchestration
//! - **[`session`]**: logout / token invalidation
//! - **[`password_reset`]**: reset-link issuance and consumption
//! - **[`profile`]**: authenticated password change, profile update, deletion
//! - **[`notify`]**: client for the external notification service

// region: --- Modules
pub mod auth;
pub mod notify;
pub mod password_reset;
pub mod profile;
pub mod session;
// endregion: --- Modules

// region: --- Re-exports
pub use auth::CredentialService;
pub use notify::{NotificationClient, NotificationRequest};
pub use password_reset::PasswordResetFlow;
pub use profile::ProfileService;
pub use session::SessionService;
// endregion: --- Re-exports

use lib_auth::pwd;
use lib_core::{AppError, Result};
use lib_utils::b64::b64_encode;

/// Derive a fresh (hash, salt) pair for a new password.
///
/// PBKDF2 is CPU-bound, so it runs on the blocking pool rather than stalling
/// the async dispatch path. Returns both columns base64-encoded, ready to
/// persist together.
pub(crate) async fn hash_new_password(password: String) -> Result<(String, String)> {
    tokio::task::spawn_blocking(move || {
        let salt = pwd::generate_salt();
        let hash = pwd::hash_password_b64(&password, &salt);
        (hash, b64_encode(salt))
    })
    .await
    .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))
}

/// Verify a password against stored credential columns, off the async path.
pub(crate) async fn verify_stored_password(
    password: String,
    stored_hash: String,
    stored_salt: String,
) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        pwd::verify_password(&password, &stored_hash, &stored_salt)
    })
    .await
    .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))?
    .map_err(|e| AppError::Internal(format!("stored credential is unusable: {}", e)))
}
