use uuid::Uuid;

/// Umbrella discussion category as reported by the discussion subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscussionCategory {
    pub id: i64,
    pub name: String,
    pub topics: Vec<TopicSummary>,
}

/// Entry of a category's topic list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicSummary {
    pub id: i64,
    /// Number of posts in the topic, the original post included.
    pub posts_count: u64,
}

/// A discussion topic with its ordered posts; `posts[0]` is the original post.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub id: i64,
    pub posts: Vec<serde_json::Value>,
}

/// Topic creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    pub title: String,
    pub text: String,
    /// Discussion category the topic is filed under.
    pub asset_id: Uuid,
}
