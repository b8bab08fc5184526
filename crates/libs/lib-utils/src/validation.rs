//! # Validation Utilities
//!
//! Input validation helpers used at the service boundary.

/// Validate that a string is not empty or whitespace-only.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format (basic structural check: one '@', dotted domain).
pub fn validate_email(email: &str) -> Result<(), String> {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err("Invalid email format".to_string()),
    }
}

/// Validate minimum length.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.len() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@at@signs.com").is_err());
        assert!(validate_email("alice@nodot").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("x", "field").is_ok());
        assert!(validate_not_empty("   ", "field").is_err());
    }

    #[test]
    fn test_validate_min_length() {
        assert!(validate_min_length("12345678", 8, "password").is_ok());
        assert!(validate_min_length("1234567", 8, "password").is_err());
    }
}
