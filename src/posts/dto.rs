use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::posts::repo::Post;
use crate::validate;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        validate::require(&mut errors, "title", &self.title);
        validate::require(&mut errors, "content", &self.content);
        validate::finish(errors)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            user_id: p.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_is_rejected() {
        let req = CreatePostRequest {
            title: "  ".into(),
            content: "body".into(),
        };
        assert!(req.validate().is_err());

        let req = CreatePostRequest {
            title: "Hello".into(),
            content: "body".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn response_names_the_owner_in_camel_case() {
        let post = Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Hello".into(),
            content: "body".into(),
            created_at: time::OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(PostResponse::from(post)).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("user_id").is_none());
    }
}
