use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{DiscussionCategory, NewTopic, Topic};
use crate::error::DiscussionError;

/// Client for the discussion subsystem.
#[async_trait]
pub trait DiscussionClient: Send + Sync {
    /// Get the category, creating it remotely if it does not exist yet.
    async fn ensure_category(&self, category_id: Uuid)
    -> Result<DiscussionCategory, DiscussionError>;

    /// Create a topic and return its id. Not idempotent, never retried.
    async fn create_topic(&self, topic: &NewTopic) -> Result<i64, DiscussionError>;

    async fn get_topic(&self, topic_id: i64) -> Result<Topic, DiscussionError>;
}
