//! # Session Service
//!
//! Logout, i.e. access-token invalidation.

use lib_core::model::store::TokenRepository;
use lib_core::{DbPool, Result};
use tracing::debug;

pub struct SessionService;

impl SessionService {
    /// Invalidate a session token.
    ///
    /// Returns `false` (not an error) when the token is unknown or already
    /// invalidated; invalidation is idempotent and at most one caller ever
    /// observes the transition.
    pub async fn logout(pool: &DbPool, token: &str) -> Result<bool> {
        let invalidated = TokenRepository::invalidate(pool, token).await?;
        debug!("[LOGOUT] Token invalidated: {}", invalidated);
        Ok(invalidated)
    }
}
