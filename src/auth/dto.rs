use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validate;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        validate::require(&mut errors, "email", &self.email);
        if !self.email.trim().is_empty() {
            validate::email(&mut errors, "email", &self.email);
            validate::length(&mut errors, "email", &self.email, 1, 100);
        }
        validate::require(&mut errors, "password", &self.password);
        if !self.password.is_empty() {
            validate::length(&mut errors, "password", &self.password, 6, 255);
        }
        validate::finish(errors)
    }
}

/// Request body for login. Credentials are checked as given; no validation
/// beyond parsing, so an unknown email and a bad password look the same.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_accepts_sane_input() {
        let req = RegisterRequest {
            email: "alice@example.com".into(),
            password: "secret123".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn register_rejects_bad_email_and_short_password() {
        let req = RegisterRequest {
            email: "not-an-email".into(),
            password: "abc".into(),
        };
        let err = req.validate().unwrap_err();
        match err {
            crate::error::ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "email");
                assert_eq!(errors[1].field, "password");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
