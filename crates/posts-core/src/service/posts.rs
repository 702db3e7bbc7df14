//! Post orchestrator.
//!
//! Coordinates the discussion subsystem, the identity subsystem and the post
//! repository for the create, read, list, delete and count use cases.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Caller, NewPost, NewTopic, Post, Roles};
use crate::error::{DiscussionError, PostError, RepoError};
use crate::ports::{DiscussionClient, IdentityClient, PostRepository, PostTransaction};
use crate::service::enrichment;

/// Progress of the create flow, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStage {
    Start,
    CategoryEnsured,
    TopicCreated,
    RowInserted,
    Committed,
}

impl fmt::Display for CreateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CreateStage::Start => "start",
            CreateStage::CategoryEnsured => "category_ensured",
            CreateStage::TopicCreated => "topic_created",
            CreateStage::RowInserted => "row_inserted",
            CreateStage::Committed => "committed",
        };
        f.write_str(name)
    }
}

/// Deletion is allowed for the post owner and for admins.
pub fn can_delete(post: &Post, caller: &Caller, roles: &Roles) -> bool {
    post.is_owned_by(&caller.user_id) || roles.is_admin()
}

/// Application service for posts.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    discussion: Arc<dyn DiscussionClient>,
    identity: Arc<dyn IdentityClient>,
    /// Discussion category every post topic is filed under.
    discussion_category: Uuid,
}

impl PostService {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        discussion: Arc<dyn DiscussionClient>,
        identity: Arc<dyn IdentityClient>,
        discussion_category: Uuid,
    ) -> Self {
        Self {
            repo,
            discussion,
            identity,
            discussion_category,
        }
    }

    /// Create a post owned by `caller`.
    ///
    /// The discussion topic is created before the row is written so a
    /// committed post always references a topic. If anything fails after the
    /// topic exists, the topic is left behind (orphan topic); it is neither
    /// deleted nor retried.
    pub async fn create_post(&self, caller: &Caller, data: NewPost) -> Result<Post, PostError> {
        data.validate()?;

        let post_id = Uuid::new_v4();
        tracing::info!(%post_id, title = %data.title, "Creating post");

        let mut txn = self.repo.begin().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to open transaction");
            PostError::Creation("Failed to create record in database".into())
        })?;

        let mut stage = CreateStage::Start;
        let outcome = self
            .create_within(txn.as_mut(), &mut stage, caller, post_id, data)
            .await;

        let post = match outcome {
            Ok(post) => post,
            Err(err) => {
                tracing::error!(%post_id, %stage, error = %err, "Post creation failed");
                if let Err(e) = txn.rollback().await {
                    tracing::warn!(%post_id, error = %e, "Rollback failed");
                }
                return Err(err);
            }
        };

        if let Err(e) = txn.commit().await {
            tracing::error!(
                %post_id,
                topic_id = post.topic_id,
                error = %e,
                "Commit failed, discussion topic is orphaned"
            );
            return Err(map_insert_error(e));
        }
        stage = CreateStage::Committed;
        tracing::debug!(%post_id, %stage, "Post created");

        Ok(post)
    }

    async fn create_within(
        &self,
        txn: &mut dyn PostTransaction,
        stage: &mut CreateStage,
        caller: &Caller,
        post_id: Uuid,
        data: NewPost,
    ) -> Result<Post, PostError> {
        self.discussion
            .ensure_category(self.discussion_category)
            .await
            .map_err(discussion_failed)?;
        *stage = CreateStage::CategoryEnsured;
        tracing::debug!(%post_id, %stage, "Discussion category ready");

        let topic = NewTopic {
            title: data.title.clone(),
            text: data.message.clone(),
            asset_id: self.discussion_category,
        };
        let topic_id = self.discussion.create_topic(&topic).await.map_err(|e| match e {
            DiscussionError::TopicCreation(msg) => PostError::DuplicateTitle(msg),
            other => discussion_failed(other),
        })?;
        *stage = CreateStage::TopicCreated;
        tracing::debug!(%post_id, topic_id, %stage, "Discussion topic created");

        let post = Post::new(post_id, caller.user_id.clone(), topic_id, data);
        let post = txn.insert(post).await.map_err(|e| {
            tracing::warn!(%post_id, topic_id, "Insert failed, discussion topic is orphaned");
            map_insert_error(e)
        })?;
        *stage = CreateStage::RowInserted;
        tracing::debug!(%post_id, %stage, "Post row inserted");

        Ok(post)
    }

    /// All posts, optionally restricted to some categories, with reply counts.
    pub async fn list_posts(&self, categories: Option<&[i32]>) -> Result<Vec<Post>, PostError> {
        tracing::debug!(?categories, "Listing posts");
        let mut posts = self.repo.find_all(categories).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to retrieve posts from database");
            PostError::Retrieval("Failed to retrieve posts from database".into())
        })?;

        enrichment::enrich_posts(self.discussion.as_ref(), self.discussion_category, &mut posts)
            .await
            .map_err(enrichment_failed)?;

        Ok(posts)
    }

    /// A single post with its replies.
    pub async fn get_post(&self, id: Uuid) -> Result<Post, PostError> {
        let mut post = self.find_post(id).await?;
        enrichment::enrich_post(self.discussion.as_ref(), &mut post)
            .await
            .map_err(enrichment_failed)?;
        Ok(post)
    }

    /// Delete a post if `caller` owns it or is an admin.
    pub async fn delete_post(&self, id: Uuid, caller: &Caller) -> Result<(), PostError> {
        let post = self.find_post(id).await?;

        let roles = self
            .identity
            .current_user_roles(caller)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Role lookup failed"))?;
        tracing::debug!(is_admin = roles.is_admin(), user_id = %caller.user_id, "Resolved caller roles");

        if !can_delete(&post, caller, &roles) {
            tracing::error!(post_id = %id, user_id = %caller.user_id, "Only the post owner or admin can delete the post.");
            return Err(PostError::Forbidden);
        }

        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => {
                PostError::Deletion(format!("Post {} not found or already deleted.", id))
            }
            other => {
                tracing::error!(post_id = %id, error = %other, "Failed to delete post");
                PostError::Deletion("Failed to delete post from database.".into())
            }
        })?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Number of posts owned by `user_id`.
    pub async fn count_posts_by_user(&self, user_id: &str) -> Result<u64, PostError> {
        tracing::debug!(%user_id, "Counting posts");
        self.repo.count_by_owner(user_id).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to retrieve post count from database");
            PostError::Count("Failed to retrieve post count from database".into())
        })
    }

    async fn find_post(&self, id: Uuid) -> Result<Post, PostError> {
        match self.repo.find_by_id(id).await {
            Ok(Some(post)) => Ok(post),
            Ok(None) => {
                tracing::error!(post_id = %id, "Post not found");
                Err(PostError::NotFound(id))
            }
            Err(e) => {
                tracing::error!(post_id = %id, error = %e, "Failed to retrieve post");
                Err(PostError::Retrieval(
                    "Failed to retrieve post from the database.".into(),
                ))
            }
        }
    }
}

fn discussion_failed(err: DiscussionError) -> PostError {
    tracing::error!(error = %err, "Failed to create discussion for post");
    PostError::Creation("Failed to create discussion for post".into())
}

fn enrichment_failed(err: DiscussionError) -> PostError {
    tracing::error!(error = %err, "Failed to fetch discussion data");
    PostError::Discussion(err.to_string())
}

fn map_insert_error(err: RepoError) -> PostError {
    match err {
        RepoError::Constraint(_) => PostError::DuplicateName(
            "Failed to create post because the name is not unique".into(),
        ),
        other => {
            tracing::error!(error = %other, "Failed to create record in database");
            PostError::Creation("Failed to create record in database".into())
        }
    }
}
