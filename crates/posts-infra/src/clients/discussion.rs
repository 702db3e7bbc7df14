//! Discussion subsystem client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use posts_core::domain::{DiscussionCategory, NewTopic, Topic, TopicSummary};
use posts_core::error::DiscussionError;
use posts_core::ports::DiscussionClient;

use super::{Envelope, ErrorEnvelope, endpoint, error_payload, flexible_id};

#[derive(Debug, Deserialize)]
struct CategoryData {
    #[serde(deserialize_with = "flexible_id")]
    id: i64,
    name: String,
    #[serde(default)]
    topics: Vec<TopicSummaryData>,
}

#[derive(Debug, Deserialize)]
struct TopicSummaryData {
    #[serde(deserialize_with = "flexible_id")]
    id: i64,
    #[serde(default)]
    posts_count: u64,
}

#[derive(Debug, Deserialize)]
struct TopicData {
    #[serde(deserialize_with = "flexible_id")]
    id: i64,
    #[serde(default)]
    posts: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct CreateTopicPayload<'a> {
    title: &'a str,
    text: &'a str,
    asset_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct CreatedTopic {
    #[serde(deserialize_with = "flexible_id")]
    topic_id: i64,
}

impl From<CategoryData> for DiscussionCategory {
    fn from(data: CategoryData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            topics: data
                .topics
                .into_iter()
                .map(|t| TopicSummary {
                    id: t.id,
                    posts_count: t.posts_count,
                })
                .collect(),
        }
    }
}

fn is_success(status: StatusCode) -> bool {
    matches!(status, StatusCode::OK | StatusCode::CREATED)
}

/// Map a transport error, naming the failed action for connectivity issues.
fn transport_error(err: reqwest::Error, action: &str) -> DiscussionError {
    if err.is_connect() {
        let message = format!("Failed to {} due to service unavailability", action);
        tracing::error!(error = %err, "{}", message);
        DiscussionError::Communication(message)
    } else {
        tracing::error!(error = %err, "Discussion service call failed");
        DiscussionError::Communication(err.to_string())
    }
}

/// reqwest-based discussion client.
#[derive(Clone)]
pub struct HttpDiscussionClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDiscussionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl DiscussionClient for HttpDiscussionClient {
    async fn ensure_category(
        &self,
        category_id: Uuid,
    ) -> Result<DiscussionCategory, DiscussionError> {
        let url = endpoint(&self.base_url, &format!("/discussion/{}", category_id));
        tracing::debug!(%url, "Fetching discussion category");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(e, "create discourse"))?;

        let status = response.status();
        if !is_success(status) {
            let error = error_payload(response).await;
            tracing::error!(%status, %error, "Failed to create discussion");
            return Err(DiscussionError::Communication(error));
        }

        let body: Envelope<CategoryData> = response
            .json()
            .await
            .map_err(|e| transport_error(e, "read discussion category"))?;
        tracing::info!(category = %body.data.name, "Discussion category ready");

        Ok(body.data.into())
    }

    async fn create_topic(&self, topic: &NewTopic) -> Result<i64, DiscussionError> {
        let url = endpoint(&self.base_url, "/topic");
        let payload = CreateTopicPayload {
            title: &topic.title,
            text: &topic.text,
            asset_id: topic.asset_id,
        };
        tracing::debug!(%url, title = %topic.title, "Creating topic");

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(e, "create topic"))?;

        let status = response.status();
        if !is_success(status) {
            let error = error_payload(response).await;
            tracing::error!(%status, %error, "Failed to create topic");
            let message = serde_json::from_str::<ErrorEnvelope>(&error)
                .map(|e| e.error.message)
                .unwrap_or(error);
            return Err(DiscussionError::TopicCreation(message));
        }

        let body: Envelope<CreatedTopic> = response
            .json()
            .await
            .map_err(|e| transport_error(e, "read created topic"))?;
        tracing::info!(topic_id = body.data.topic_id, "Topic created");

        Ok(body.data.topic_id)
    }

    async fn get_topic(&self, topic_id: i64) -> Result<Topic, DiscussionError> {
        let url = endpoint(&self.base_url, &format!("/topic/{}", topic_id));
        tracing::debug!(%url, "Fetching topic");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(e, "call discussion-service"))?;

        let status = response.status();
        if !is_success(status) {
            let error = error_payload(response).await;
            tracing::error!(%status, %error, "Failed to fetch topic info");
            return Err(DiscussionError::Communication(error));
        }

        let body: Envelope<TopicData> = response
            .json()
            .await
            .map_err(|e| transport_error(e, "read topic"))?;

        Ok(Topic {
            id: body.data.id,
            posts: body.data.posts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::stub::{self, UNREACHABLE};

    fn topic(title: &str) -> NewTopic {
        NewTopic {
            title: title.into(),
            text: "body".into(),
            asset_id: Uuid::new_v4(),
        }
    }

    #[actix_web::test]
    async fn test_ensure_category_parses_topics() {
        let server = stub::spawn(stub::discussion).await;
        let client = HttpDiscussionClient::new(&server.base_url);

        let category = client.ensure_category(Uuid::new_v4()).await.unwrap();

        assert_eq!(category.id, 1);
        assert_eq!(category.name, "postdiscussion");
        assert_eq!(
            category.topics,
            vec![
                TopicSummary { id: 123, posts_count: 4 },
                TopicSummary { id: 124, posts_count: 1 },
            ]
        );
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_ensure_category_unexpected_status() {
        let server = stub::spawn(stub::discussion).await;
        let client = HttpDiscussionClient::new(&server.base_url);

        let result = client.ensure_category(Uuid::nil()).await;

        match result {
            Err(DiscussionError::Communication(msg)) => assert!(msg.contains("boom")),
            other => panic!("unexpected result: {other:?}"),
        }
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_create_topic_returns_id() {
        let server = stub::spawn(stub::discussion).await;
        let client = HttpDiscussionClient::new(&server.base_url);

        let id = client.create_topic(&topic("Fresh title")).await.unwrap();

        assert_eq!(id, 777);
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_create_topic_rejection_carries_remote_message() {
        let server = stub::spawn(stub::discussion).await;
        let client = HttpDiscussionClient::new(&server.base_url);

        let result = client.create_topic(&topic(stub::TAKEN_TITLE)).await;

        match result {
            Err(DiscussionError::TopicCreation(msg)) => {
                assert_eq!(msg, "Title has already been used")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_get_topic_keeps_post_order() {
        let server = stub::spawn(stub::discussion).await;
        let client = HttpDiscussionClient::new(&server.base_url);

        let topic = client.get_topic(123).await.unwrap();

        assert_eq!(topic.id, 123);
        assert_eq!(topic.posts.len(), 3);
        assert_eq!(topic.posts[0]["post_number"], 1);
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_get_missing_topic_is_communication_error() {
        let server = stub::spawn(stub::discussion).await;
        let client = HttpDiscussionClient::new(&server.base_url);

        let result = client.get_topic(404).await;

        assert!(matches!(result, Err(DiscussionError::Communication(_))));
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_unreachable_service() {
        let client = HttpDiscussionClient::new(UNREACHABLE);

        match client.create_topic(&topic("Title")).await {
            Err(DiscussionError::Communication(msg)) => assert_eq!(
                msg,
                "Failed to create topic due to service unavailability"
            ),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            client.ensure_category(Uuid::new_v4()).await,
            Err(DiscussionError::Communication(_))
        ));
    }
}
