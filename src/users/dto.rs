use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::repo::User;
use crate::validate;

/// Outward representation of a user. The password hash has no field here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl CreateUserRequest {
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
        if let Some(v) = self.first_name.as_deref() {
            validate::length(&mut errors, "firstName", v, 0, 50);
        }
        if let Some(v) = self.last_name.as_deref() {
            validate::length(&mut errors, "lastName", v, 0, 50);
        }
        validate::finish(errors)
    }
}

/// Partial update: only fields present in the payload are applied, even
/// though the endpoint is exposed over PUT.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if let Some(v) = self.email.as_deref() {
            validate::require(&mut errors, "email", v);
            if !v.trim().is_empty() {
                validate::email(&mut errors, "email", v);
                validate::length(&mut errors, "email", v, 1, 100);
            }
        }
        if let Some(v) = self.password.as_deref() {
            validate::length(&mut errors, "password", v, 6, 255);
        }
        if let Some(v) = self.first_name.as_deref() {
            validate::length(&mut errors, "firstName", v, 0, 50);
        }
        if let Some(v) = self.last_name.as_deref() {
            validate::length(&mut errors, "lastName", v, 0, 50);
        }
        validate::finish(errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn response_uses_camel_case_and_drops_password() {
        let user = User {
            id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            password_hash: "hash".into(),
            first_name: Some("Alice".into()),
            last_name: Some("Doe".into()),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["firstName"], "Alice");
        assert_eq!(json["lastName"], "Doe");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn update_request_fields_default_to_absent() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"lastName": "X"}"#).unwrap();
        assert!(req.email.is_none());
        assert!(req.password.is_none());
        assert!(req.first_name.is_none());
        assert_eq!(req.last_name.as_deref(), Some("X"));
    }

    #[test]
    fn update_request_validates_only_present_fields() {
        let req = UpdateUserRequest {
            last_name: Some("X".into()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());

        let req = UpdateUserRequest {
            email: Some("not-an-email".into()),
            password: Some("abc".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
