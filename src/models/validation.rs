//! Validation error types and field-level checks

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Light-weight email shape check. The store's UNIQUE constraint remains the
/// final arbiter of uniqueness; this only rejects obviously malformed input.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Validation error for request payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Field was sent as an explicit `null`
    Null { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::Null { field } => write!(f, "{} must not be null", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Require a non-empty string no longer than `max` characters.
pub fn require_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Require a non-empty string with no upper bound.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Require a plausibly-shaped email address.
pub fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "not a valid email address",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 200,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 200 characters"
        );
    }

    #[test]
    fn length_bounds() {
        assert!(require_length("name", "Ann", 100).is_ok());
        assert_eq!(
            require_length("name", "", 100),
            Err(ValidationError::Empty { field: "name" })
        );
        assert_eq!(
            require_length("name", &"x".repeat(101), 100),
            Err(ValidationError::TooLong {
                field: "name",
                max: 100
            })
        );
    }

    #[test]
    fn email_format() {
        assert!(require_email("email", "ann@x.com").is_ok());
        assert!(require_email("email", "not-an-email").is_err());
        assert!(require_email("email", "a b@x.com").is_err());
        assert_eq!(
            require_email("email", ""),
            Err(ValidationError::Empty { field: "email" })
        );
    }
}
