use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;

/// Post persistence.
///
/// Writes that must share a transaction with other steps go through a
/// [`PostTransaction`] obtained from [`PostRepository::begin`]; the caller
/// decides when to commit.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Open a transaction scope for inserting posts.
    async fn begin(&self) -> Result<Box<dyn PostTransaction>, RepoError>;

    /// All posts with their category name (left join), optionally restricted
    /// to the given category ids.
    async fn find_all(&self, categories: Option<&[i32]>) -> Result<Vec<Post>, RepoError>;

    /// A single post with its category name (inner join).
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Delete a post and its discourse linkage rows in one transaction.
    ///
    /// Returns `RepoError::NotFound` without touching the linkage rows when
    /// no post row was deleted.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Number of posts owned by `owner_id`; zero when there are none.
    async fn count_by_owner(&self, owner_id: &str) -> Result<u64, RepoError>;
}

/// An open write transaction. Dropping it without committing rolls back.
#[async_trait]
pub trait PostTransaction: Send {
    /// Insert a post row. Never commits.
    ///
    /// A unique constraint violation is reported as `RepoError::Constraint`.
    async fn insert(&mut self, post: Post) -> Result<Post, RepoError>;

    async fn commit(self: Box<Self>) -> Result<(), RepoError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepoError>;
}
