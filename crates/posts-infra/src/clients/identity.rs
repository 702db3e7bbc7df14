//! Identity subsystem client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use posts_core::domain::{Caller, Roles};
use posts_core::error::IdentityError;
use posts_core::ports::IdentityClient;

use super::{Envelope, endpoint, error_payload};

#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(default)]
    roles: Vec<String>,
}

/// reqwest-based identity client. Forwards the caller's bearer token.
#[derive(Clone)]
pub struct HttpIdentityClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpIdentityClient {
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

fn roles_failed(detail: impl std::fmt::Display) -> IdentityError {
    tracing::error!(error = %detail, "Failed to get current user roles");
    IdentityError::Roles(detail.to_string())
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn current_user_roles(&self, caller: &Caller) -> Result<Roles, IdentityError> {
        tracing::debug!(user_id = %caller.user_id, "Getting current user roles");

        let mut request = self.client.get(endpoint(&self.base_url, "/profile"));
        if let Some(token) = &caller.credentials {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(roles_failed)?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                tracing::error!(user_id = %caller.user_id, "User is not logged in");
                Err(IdentityError::NotLoggedIn)
            }
            StatusCode::OK => {
                let body: Envelope<Profile> = response.json().await.map_err(roles_failed)?;
                tracing::debug!(roles = ?body.data.roles, "User is logged in");
                Ok(body.data.roles.into_iter().collect())
            }
            status => {
                let error = error_payload(response).await;
                Err(roles_failed(format!("identity service answered {}: {}", status, error)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::stub::{self, UNREACHABLE};

    fn caller(token: Option<&str>) -> Caller {
        Caller::new("1234", token.map(str::to_owned))
    }

    #[actix_web::test]
    async fn test_roles_are_case_insensitive() {
        let server = stub::spawn(stub::identity).await;
        let client = HttpIdentityClient::new(&server.base_url);

        let roles = client
            .current_user_roles(&caller(Some(stub::ADMIN_TOKEN)))
            .await
            .unwrap();

        assert!(roles.is_admin());
        assert!(roles.contains("user"));
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_regular_user_is_not_admin() {
        let server = stub::spawn(stub::identity).await;
        let client = HttpIdentityClient::new(&server.base_url);

        let roles = client
            .current_user_roles(&caller(Some(stub::USER_TOKEN)))
            .await
            .unwrap();

        assert!(!roles.is_admin());
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_unauthorized_is_not_logged_in() {
        let server = stub::spawn(stub::identity).await;
        let client = HttpIdentityClient::new(&server.base_url);

        let result = client.current_user_roles(&caller(None)).await;

        assert!(matches!(result, Err(IdentityError::NotLoggedIn)));
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_other_status_is_roles_error() {
        let server = stub::spawn(stub::identity).await;
        let client = HttpIdentityClient::new(&server.base_url);

        let result = client.current_user_roles(&caller(Some("broken"))).await;

        assert!(matches!(result, Err(IdentityError::Roles(_))));
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_unreachable_service_is_roles_error() {
        let client = HttpIdentityClient::new(UNREACHABLE);

        let result = client.current_user_roles(&caller(Some(stub::USER_TOKEN))).await;

        assert!(matches!(result, Err(IdentityError::Roles(_))));
    }
}
