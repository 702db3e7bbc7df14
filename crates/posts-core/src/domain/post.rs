use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PostError;

/// Maximum number of characters allowed in a post title.
pub const MAX_TITLE_LEN: usize = 64;

/// Post entity - a user-authored item backed by a discussion topic.
///
/// `category_name`, `reply_count` and `replies` are never persisted: the
/// first is joined from the categories table, the other two are filled in
/// from the discussion subsystem at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub owner_id: String,
    pub category_id: i32,
    pub category_name: Option<String>,
    pub topic_id: i64,
    pub created_at: DateTime<Utc>,
    pub reply_count: Option<u64>,
    pub replies: Option<Vec<serde_json::Value>>,
}

impl Post {
    /// Build the post row for a freshly created topic.
    pub fn new(id: Uuid, owner_id: String, topic_id: i64, data: NewPost) -> Self {
        Self {
            id,
            title: data.title,
            message: data.message,
            owner_id,
            category_id: data.category_id,
            category_name: None,
            topic_id,
            created_at: Utc::now(),
            reply_count: None,
            replies: None,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

/// Payload for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub message: String,
    pub category_id: i32,
}

impl NewPost {
    pub fn new(title: impl Into<String>, message: impl Into<String>, category_id: i32) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            category_id,
        }
    }

    /// Check the title length, in characters, is within `1..=MAX_TITLE_LEN`.
    pub fn validate(&self) -> Result<(), PostError> {
        let len = self.title.chars().count();
        if len == 0 {
            return Err(PostError::InvalidTitle(
                "Failed to create post: Post name must not be empty".into(),
            ));
        }
        if len > MAX_TITLE_LEN {
            return Err(PostError::InvalidTitle(format!(
                "Failed to create post: Post name is too long ({} characters max)",
                MAX_TITLE_LEN
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(NewPost::new("", "body", 1).validate().is_err());
        assert!(NewPost::new("a", "body", 1).validate().is_ok());
        assert!(NewPost::new("a".repeat(64), "body", 1).validate().is_ok());
        assert!(matches!(
            NewPost::new("a".repeat(65), "body", 1).validate(),
            Err(PostError::InvalidTitle(_))
        ));
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 64 multi-byte characters are still a valid title.
        let title = "é".repeat(64);
        assert!(title.len() > MAX_TITLE_LEN);
        assert!(NewPost::new(title, "body", 1).validate().is_ok());
    }

    #[test]
    fn test_new_post_has_no_derived_fields() {
        let id = Uuid::new_v4();
        let post = Post::new(id, "1234".into(), 42, NewPost::new("Title", "Body", 3));

        assert_eq!(post.id, id);
        assert_eq!(post.topic_id, 42);
        assert_eq!(post.category_id, 3);
        assert!(post.is_owned_by("1234"));
        assert!(post.category_name.is_none());
        assert!(post.reply_count.is_none());
        assert!(post.replies.is_none());
    }
}
