//! Error taxonomy for the posts domain.
//!
//! Each layer owns its own error type. Adapters raise `RepoError`,
//! `DiscussionError`, `IdentityError` or `StorageError`; the orchestrator
//! wraps them into the coarser `PostError` its callers see.

use thiserror::Error;
use uuid::Uuid;

/// Post-level errors - the contract of the post orchestrator.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    /// Generic creation failure.
    #[error("{0}")]
    Creation(String),

    /// The discussion subsystem refused the topic, usually because a topic
    /// with the same title already exists.
    #[error("{0}")]
    DuplicateTitle(String),

    /// The local unique constraint on the post title was violated.
    #[error("{0}")]
    DuplicateName(String),

    #[error("Post with ID {0} not found.")]
    NotFound(Uuid),

    #[error("{0}")]
    Retrieval(String),

    #[error("Only the post owner or admin can delete the post.")]
    Forbidden,

    #[error("User is not logged in")]
    NotLoggedIn,

    #[error("Failed to get current user roles: {0}")]
    Roles(String),

    #[error("{0}")]
    Deletion(String),

    #[error("{0}")]
    Count(String),

    /// Read-time enrichment against the discussion subsystem failed.
    #[error("{0}")]
    Discussion(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Failures talking to the discussion subsystem.
#[derive(Debug, Error)]
pub enum DiscussionError {
    /// Unreachable service or unexpected status.
    #[error("Discussion service error: {0}")]
    Communication(String),

    /// Topic creation was rejected by the service.
    #[error("{0}")]
    TopicCreation(String),
}

/// Failures talking to the identity subsystem.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("User is not logged in")]
    NotLoggedIn,

    #[error("Failed to get current user roles: {0}")]
    Roles(String),
}

/// Failures talking to the storage subsystem.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to delete repository: {0}")]
    RepositoryDeletion(String),
}

impl From<IdentityError> for PostError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotLoggedIn => PostError::NotLoggedIn,
            IdentityError::Roles(msg) => PostError::Roles(msg),
        }
    }
}
