//! # Posts Infrastructure
//!
//! Concrete implementations of the ports defined in `posts-core`:
//! the SeaORM post repository, reqwest clients for the discussion, identity
//! and storage services, and JWT validation of caller tokens.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Remote clients only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT authentication

pub mod clients;
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use clients::{HttpDiscussionClient, HttpIdentityClient, HttpStorageClient};
pub use database::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
