//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod discussion;
mod identity;
mod repository;
mod storage;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use discussion::DiscussionClient;
pub use identity::IdentityClient;
pub use repository::{PostRepository, PostTransaction};
pub use storage::StorageClient;
