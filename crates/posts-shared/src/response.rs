//! Standardized API response types (RFC 7807 compliant for errors).

use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

/// Stable error codes clients can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    FailedToCreatePost,
    FailedToCreatePostNotUniqueName,
    FailedToGetPost,
    FailedToDeletePost,
    FailedToCountPosts,
    NotLoggedIn,
    InvalidToken,
    InternalError,
}

/// RFC 7807 Problem Details for HTTP APIs, extended with a stable `code`.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// Machine-readable error code.
    pub code: ErrorCode,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            code,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_wire_format() {
        let body = ErrorResponse::new(409, "Conflict", ErrorCode::FailedToCreatePostNotUniqueName)
            .with_detail("name is not unique");

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["code"], "FAILED_TO_CREATE_POST_NOT_UNIQUE_NAME");
        assert_eq!(json["status"], 409);
        assert_eq!(json["detail"], "name is not unique");
    }
}
