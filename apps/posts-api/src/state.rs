//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;

use posts_core::PostService;
use posts_core::ports::{DiscussionClient, IdentityClient, PostRepository};
use posts_infra::database::{self, PostgresPostRepository};
use posts_infra::{HttpDiscussionClient, HttpIdentityClient};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the application state from configuration.
    ///
    /// The service cannot run without its database, so a missing
    /// `DATABASE_URL` or a failed connection aborts startup.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db_config = config
            .database
            .as_ref()
            .context("DATABASE_URL is not set")?;

        let db = database::connect(db_config)
            .await
            .context("Failed to connect to database")?;
        let repo: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(db));

        // One connection pool for every remote service.
        let http = reqwest::Client::new();
        let discussion: Arc<dyn DiscussionClient> = Arc::new(HttpDiscussionClient::with_client(
            config.services.discussion.clone(),
            http.clone(),
        ));
        let identity: Arc<dyn IdentityClient> = Arc::new(HttpIdentityClient::with_client(
            config.services.identity.clone(),
            http,
        ));

        tracing::info!(
            discussion = %config.services.discussion,
            identity = %config.services.identity,
            category = %config.discussion_category,
            "Application state initialized"
        );

        Ok(Self::from_service(PostService::new(
            repo,
            discussion,
            identity,
            config.discussion_category,
        )))
    }

    pub fn from_service(posts: PostService) -> Self {
        Self { posts }
    }
}
