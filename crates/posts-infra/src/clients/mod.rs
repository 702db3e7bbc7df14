//! HTTP clients for the remote discussion, identity and storage services.
//!
//! Every client normalises transport failures and unexpected statuses into
//! the error type of its port. Nothing is retried.

mod discussion;
mod identity;
mod storage;

#[cfg(test)]
mod stub;

pub use discussion::HttpDiscussionClient;
pub use identity::HttpIdentityClient;
pub use storage::HttpStorageClient;

use serde::{Deserialize, Deserializer};

/// Success responses of the remote services wrap their payload in `data`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error responses carry `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Join a service base URL and a path without doubling slashes.
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Read an error body for logging and error messages.
async fn error_payload(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => format!("status {}", status),
    }
}

/// Ids arrive either as JSON numbers or numeric strings.
fn flexible_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
