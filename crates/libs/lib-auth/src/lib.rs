//! # Authentication Library
//!
//! Password hashing and signed-token management. No storage or transport
//! concerns live here; the web layer wires these primitives to repositories.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{generate_salt, hash_password_b64, verify_password, PwdError};
pub use token::{Claims, IssuedToken, TokenKind, TokenError, issue_token, decode_token};
