//! # Middleware
//!
//! Axum middleware for bearer-token authentication.

// region: --- Modules
pub mod mw_auth;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::require_auth;
// endregion: --- Re-exports
