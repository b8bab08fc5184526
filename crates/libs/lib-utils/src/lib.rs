//! # Utilities Library
//!
//! Shared utility functions for base64 encoding, environment variables, time, and validation.

pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{b64_encode, b64_decode};
pub use envs::{get_env, get_env_parse, get_env_parse_or};
pub use time::{now_utc, format_time, minutes_from_now};
pub use validation::{validate_not_empty, validate_email, validate_min_length};
