//! Storage subsystem client.

use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

use posts_core::error::StorageError;
use posts_core::ports::StorageClient;

use super::{endpoint, error_payload};

/// reqwest-based storage client.
#[derive(Clone)]
pub struct HttpStorageClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStorageClient {
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
impl StorageClient for HttpStorageClient {
    async fn delete_repository(&self, resource_id: Uuid) -> Result<(), StorageError> {
        let url = endpoint(&self.base_url, &format!("/repository/{}", resource_id));

        let response = self.client.delete(&url).send().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to delete storage due to service unavailability");
            if e.is_connect() {
                StorageError::RepositoryDeletion(
                    "Failed to delete storage due to service unavailability".into(),
                )
            } else {
                StorageError::RepositoryDeletion(e.to_string())
            }
        })?;

        let status = response.status();
        if !matches!(status, StatusCode::OK | StatusCode::NO_CONTENT) {
            let error = error_payload(response).await;
            tracing::error!(%resource_id, %status, %error, "Failed to delete repository for the resource");
            return Err(StorageError::RepositoryDeletion(error));
        }

        tracing::info!(%resource_id, "Repository for resource deleted successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::stub::{self, UNREACHABLE};

    #[actix_web::test]
    async fn test_delete_repository_success() {
        let server = stub::spawn(stub::storage).await;
        let client = HttpStorageClient::new(&server.base_url);

        client.delete_repository(Uuid::new_v4()).await.unwrap();
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_delete_repository_failure_carries_body() {
        let server = stub::spawn(stub::storage).await;
        let client = HttpStorageClient::new(&server.base_url);

        match client.delete_repository(Uuid::nil()).await {
            Err(StorageError::RepositoryDeletion(body)) => assert!(body.contains("gitlab")),
            other => panic!("unexpected result: {other:?}"),
        }
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_unreachable_storage() {
        let client = HttpStorageClient::new(UNREACHABLE);

        match client.delete_repository(Uuid::new_v4()).await {
            Err(StorageError::RepositoryDeletion(msg)) => assert_eq!(
                msg,
                "Failed to delete storage due to service unavailability"
            ),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
