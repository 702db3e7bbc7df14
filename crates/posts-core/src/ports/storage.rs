use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StorageError;

/// Client for the storage subsystem.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Delete the storage repository attached to a resource.
    async fn delete_repository(&self, resource_id: Uuid) -> Result<(), StorageError>;
}
