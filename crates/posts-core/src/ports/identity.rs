use async_trait::async_trait;

use crate::domain::{Caller, Roles};
use crate::error::IdentityError;

/// Client for the identity subsystem.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Roles of the calling user, resolved with the caller's credentials.
    async fn current_user_roles(&self, caller: &Caller) -> Result<Roles, IdentityError>;
}
