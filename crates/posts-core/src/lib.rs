//! # Posts Core
//!
//! The domain layer of the posts service.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the ports adapters must implement, and the post orchestrator.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use error::{DiscussionError, IdentityError, PostError, RepoError, StorageError};
pub use service::PostService;
