//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(deserialize_with = "numeric_id")]
    pub category_id: i32,
    pub message: String,
}

/// Existing clients send the category id as a JSON number or a numeric
/// string.
fn numeric_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i32),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid category id: {:?}", text))),
    }
}

/// A post as returned by the API. Field names follow the existing clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "despUserId")]
    pub owner_id: String,
    #[serde(rename = "topicId")]
    pub topic_id: i64,
    #[serde(rename = "categoryId")]
    pub category_id: i32,
    #[serde(rename = "categoryName", skip_serializing_if = "Option::is_none", default)]
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reply_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub replies: Option<Vec<serde_json::Value>>,
}

/// Query string of the list endpoint: `?categories=1,2,3`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub categories: Option<String>,
}

impl ListPostsQuery {
    /// Parse the comma separated category ids. `None` means no filter.
    pub fn category_ids(&self) -> Result<Option<Vec<i32>>, String> {
        let Some(raw) = self.categories.as_deref() else {
            return Ok(None);
        };
        raw.split(',')
            .map(|item| {
                item.trim()
                    .parse::<i32>()
                    .map_err(|_| format!("Invalid category id: {:?}", item))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Confirmation of a deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostResponse {
    pub message: String,
}

/// Number of posts owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCountResponse {
    pub user_id: String,
    pub count: u64,
}
