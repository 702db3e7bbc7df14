//! Read-time enrichment of posts with live discussion data.
//!
//! Nothing computed here is persisted. Enrichment is not best-effort: a
//! failing discussion call fails the whole read.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{DiscussionCategory, Post, Topic};
use crate::error::DiscussionError;
use crate::ports::DiscussionClient;

/// Fill `reply_count` on every post from the category's topic list.
///
/// The category is fetched once. Posts whose topic is missing from the list
/// keep `reply_count = None`.
pub async fn enrich_posts(
    discussion: &dyn DiscussionClient,
    category_id: Uuid,
    posts: &mut [Post],
) -> Result<(), DiscussionError> {
    if posts.is_empty() {
        return Ok(());
    }

    tracing::debug!("Fetching additional info from discourse");
    let category = discussion.ensure_category(category_id).await?;

    tracing::debug!(
        topics = category.topics.len(),
        "Crossing posts with discourse topics"
    );
    apply_reply_counts(&category, posts);
    Ok(())
}

/// Fill `replies` and `reply_count` on a single post from its topic.
pub async fn enrich_post(
    discussion: &dyn DiscussionClient,
    post: &mut Post,
) -> Result<(), DiscussionError> {
    tracing::debug!(topic_id = post.topic_id, "Fetching topic from discourse");
    let topic = discussion.get_topic(post.topic_id).await?;
    apply_replies(topic, post);
    Ok(())
}

fn apply_reply_counts(category: &DiscussionCategory, posts: &mut [Post]) {
    let counts: HashMap<i64, u64> = category
        .topics
        .iter()
        .map(|topic| (topic.id, topic.posts_count))
        .collect();

    for post in posts.iter_mut() {
        // posts_count includes the original post
        post.reply_count = counts
            .get(&post.topic_id)
            .map(|count| count.saturating_sub(1));
    }
}

fn apply_replies(topic: Topic, post: &mut Post) {
    let replies: Vec<_> = topic.posts.into_iter().skip(1).collect();
    post.reply_count = Some(replies.len() as u64);
    post.replies = Some(replies);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::TopicSummary;
    use crate::testing::{FakeDiscussion, sample_post};

    fn category(topics: &[(i64, u64)]) -> DiscussionCategory {
        DiscussionCategory {
            id: 1,
            name: "postdiscussion".into(),
            topics: topics
                .iter()
                .map(|&(id, posts_count)| TopicSummary { id, posts_count })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_reply_count_excludes_original_post() {
        let discussion = FakeDiscussion::default().with_category(category(&[(10, 5), (11, 1)]));
        let mut posts = vec![sample_post("1", 10), sample_post("1", 11)];

        enrich_posts(&discussion, Uuid::new_v4(), &mut posts)
            .await
            .unwrap();

        assert_eq!(posts[0].reply_count, Some(4));
        assert_eq!(posts[1].reply_count, Some(0));
        assert_eq!(discussion.category_calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_topic_keeps_reply_count_unset() {
        let discussion = FakeDiscussion::default().with_category(category(&[(10, 3)]));
        let mut posts = vec![sample_post("1", 99)];

        enrich_posts(&discussion, Uuid::new_v4(), &mut posts)
            .await
            .unwrap();

        assert_eq!(posts[0].reply_count, None);
    }

    #[tokio::test]
    async fn test_empty_list_skips_discussion_call() {
        let discussion = FakeDiscussion::default();
        let mut posts: Vec<Post> = Vec::new();

        enrich_posts(&discussion, Uuid::new_v4(), &mut posts)
            .await
            .unwrap();

        assert_eq!(discussion.category_calls(), 0);
    }

    #[tokio::test]
    async fn test_single_post_drops_original_from_replies() {
        let discussion = FakeDiscussion::default().with_topic(Topic {
            id: 10,
            posts: vec![
                json!({"id": 1, "cooked": "original"}),
                json!({"id": 2, "cooked": "first reply"}),
                json!({"id": 3, "cooked": "second reply"}),
            ],
        });
        let mut post = sample_post("1", 10);

        enrich_post(&discussion, &mut post).await.unwrap();

        let replies = post.replies.unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["cooked"], "first reply");
        assert_eq!(post.reply_count, Some(2));
    }

    #[tokio::test]
    async fn test_single_post_fails_when_topic_unavailable() {
        let discussion = FakeDiscussion::default();
        let mut post = sample_post("1", 10);

        let result = enrich_post(&discussion, &mut post).await;

        assert!(matches!(result, Err(DiscussionError::Communication(_))));
        assert!(post.replies.is_none());
    }
}
