//! # Password Hashing
//!
//! Salted password hashing and verification using PBKDF2-HMAC-SHA256.
//!
//! Credentials are stored as two base64 columns: a 20-byte derived hash and
//! the 16-byte salt it was derived with. Hash and salt are always produced
//! together; callers must never persist one without the other.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use thiserror::Error;

use lib_utils::b64::{b64_decode, b64_encode};

/// Salt width in bytes.
pub const SALT_LEN: usize = 16;
/// Derived hash width in bytes.
pub const HASH_LEN: usize = 20;
/// PBKDF2 iteration count. Matches the stored credentials, so it cannot be
/// changed without a migration that rehashes on next login.
const PBKDF2_ROUNDS: u32 = 100_000;

/// Error types for password operations.
///
/// A wrong password is never an error; it is `Ok(false)` from
/// [`verify_password`]. Errors mean the stored material itself is unusable.
#[derive(Debug, Error, PartialEq)]
pub enum PwdError {
    /// Stored salt is not valid base64.
    #[error("stored password salt is not decodable")]
    InvalidStoredSalt,
}

/// Generate a fresh 16-byte salt from the OS CSPRNG.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive the 20-byte hash for (password, salt).
///
/// Deterministic: the same inputs always produce the same output.
pub fn hash_password(password: &str, salt: &[u8]) -> [u8; HASH_LEN] {
    let mut hash = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut hash);
    hash
}

/// Derive the hash for (password, salt) and return it base64-encoded, the
/// form in which it is persisted.
pub fn hash_password_b64(password: &str, salt: &[u8]) -> String {
    b64_encode(hash_password(password, salt))
}

/// Verify a password against a stored (hash, salt) pair.
///
/// Decodes the stored salt, recomputes the derivation, and compares the
/// encoded forms for exact equality.
pub fn verify_password(
    password: &str,
    stored_hash_b64: &str,
    stored_salt_b64: &str,
) -> Result<bool, PwdError> {
    let salt = b64_decode(stored_salt_b64).map_err(|_| PwdError::InvalidStoredSalt)?;
    Ok(hash_password_b64(password, &salt) == stored_hash_b64)
}
