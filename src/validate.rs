//! Explicit request validation, applied at the handler boundary.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::error::ApiError;

/// One failed constraint on one field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn require(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field: field.into(),
            message: "must not be blank".into(),
        });
    }
}

pub fn email(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if !is_valid_email(value) {
        errors.push(FieldError {
            field: field.into(),
            message: "must be a well-formed email address".into(),
        });
    }
}

pub fn length(errors: &mut Vec<FieldError>, field: &str, value: &str, min: usize, max: usize) {
    let n = value.chars().count();
    if n < min || n > max {
        errors.push(FieldError {
            field: field.into(),
            message: format!("size must be between {} and {}", min, max),
        });
    }
}

pub fn finish(errors: Vec<FieldError>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.io"));
    }

    #[test]
    fn rejects_junk() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn blank_and_length_rules_accumulate() {
        let mut errors = Vec::new();
        require(&mut errors, "email", "   ");
        length(&mut errors, "password", "abc", 6, 255);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[1].field, "password");
        assert!(finish(errors).is_err());
    }

    #[test]
    fn finish_passes_when_clean() {
        assert!(finish(Vec::new()).is_ok());
    }
}
