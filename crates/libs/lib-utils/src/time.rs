//! # Time Utilities
//!
//! Utilities for time formatting and manipulation using chrono.

use chrono::{DateTime, Duration, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format time as RFC3339 string.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339()
}

/// Absolute UTC timestamp a number of minutes from now. Negative values yield
/// a moment in the past (used to fabricate already-expired tokens in tests).
pub fn minutes_from_now(minutes: i64) -> DateTime<Utc> {
    Utc::now() + Duration::minutes(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_from_now_direction() {
        assert!(minutes_from_now(60) > now_utc());
        assert!(minutes_from_now(-1) < now_utc());
    }
}
