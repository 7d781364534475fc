//! Field-merge rule for user updates.

use crate::users::dto::UpdateUserRequest;
use crate::users::repo::User;

/// Applies only the fields present in the payload to the stored record.
/// The password arrives pre-hashed; plaintext never reaches this point.
/// Email uniqueness is the caller's job (advisory check + unique index).
pub fn apply_update(user: &mut User, incoming: UpdateUserRequest, password_hash: Option<String>) {
    if let Some(v) = incoming.first_name {
        user.first_name = Some(v);
    }
    if let Some(v) = incoming.last_name {
        user.last_name = Some(v);
    }
    if let Some(v) = incoming.email {
        user.email = v;
    }
    if let Some(h) = password_hash {
        user.password_hash = h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn existing() -> User {
        User {
            id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            password_hash: "old-hash".into(),
            first_name: Some("Alice".into()),
            last_name: Some("Doe".into()),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn absent_fields_stay_untouched() {
        let mut user = existing();
        let incoming = UpdateUserRequest {
            last_name: Some("Smith".into()),
            ..Default::default()
        };
        apply_update(&mut user, incoming, None);

        assert_eq!(user.last_name.as_deref(), Some("Smith"));
        assert_eq!(user.first_name.as_deref(), Some("Alice"));
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.password_hash, "old-hash");
    }

    #[test]
    fn email_and_password_overwrite_when_present() {
        let mut user = existing();
        let incoming = UpdateUserRequest {
            email: Some("alice@new.example".into()),
            password: Some("ignored-here".into()),
            ..Default::default()
        };
        apply_update(&mut user, incoming, Some("new-hash".into()));

        assert_eq!(user.email, "alice@new.example");
        assert_eq!(user.password_hash, "new-hash");
        assert_eq!(user.first_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn empty_payload_changes_nothing() {
        let mut user = existing();
        let before = user.clone();
        apply_update(&mut user, UpdateUserRequest::default(), None);

        assert_eq!(user.email, before.email);
        assert_eq!(user.first_name, before.first_name);
        assert_eq!(user.last_name, before.last_name);
        assert_eq!(user.password_hash, before.password_hash);
    }
}
