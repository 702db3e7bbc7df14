//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use posts_core::PostError;
use posts_core::ports::AuthError;
use posts_shared::{ErrorCode, ErrorResponse};
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
///
/// Every variant carries the stable code clients branch on and the detail
/// shown to them.
#[derive(Debug)]
pub enum AppError {
    NotFound(ErrorCode, String),
    BadRequest(ErrorCode, String),
    Unauthorized(ErrorCode, String),
    Forbidden(ErrorCode, String),
    Conflict(ErrorCode, String),
    BadGateway(ErrorCode, String),
    Internal(ErrorCode, String),
}

impl AppError {
    fn parts(&self) -> (ErrorCode, &str) {
        match self {
            AppError::NotFound(code, detail)
            | AppError::BadRequest(code, detail)
            | AppError::Unauthorized(code, detail)
            | AppError::Forbidden(code, detail)
            | AppError::Conflict(code, detail)
            | AppError::BadGateway(code, detail)
            | AppError::Internal(code, detail) => (*code, detail.as_str()),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::NotFound(..) => "Not Found",
            AppError::BadRequest(..) => "Bad Request",
            AppError::Unauthorized(..) => "Unauthorized",
            AppError::Forbidden(..) => "Forbidden",
            AppError::Conflict(..) => "Conflict",
            AppError::BadGateway(..) => "Bad Gateway",
            AppError::Internal(..) => "Internal Server Error",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (code, detail) = self.parts();
        write!(f, "{}: {:?} {}", self.title(), code, detail)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::BadRequest(..) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(..) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(..) => StatusCode::FORBIDDEN,
            AppError::Conflict(..) => StatusCode::CONFLICT,
            AppError::BadGateway(..) => StatusCode::BAD_GATEWAY,
            AppError::Internal(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (code, detail) = self.parts();

        if status.is_server_error() {
            tracing::error!(?code, %detail, "Request failed");
        }

        let error = ErrorResponse::new(status.as_u16(), self.title(), code).with_detail(detail);
        HttpResponse::build(status).json(error)
    }
}

// Conversion from domain errors
impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        let detail = err.to_string();
        match err {
            PostError::InvalidTitle(msg) => AppError::BadRequest(ErrorCode::FailedToCreatePost, msg),
            PostError::DuplicateTitle(msg) => {
                AppError::BadRequest(ErrorCode::FailedToCreatePostNotUniqueName, msg)
            }
            PostError::DuplicateName(msg) => {
                AppError::Conflict(ErrorCode::FailedToCreatePostNotUniqueName, msg)
            }
            PostError::Creation(msg) => AppError::Internal(ErrorCode::FailedToCreatePost, msg),
            PostError::NotFound(_) => AppError::NotFound(ErrorCode::FailedToGetPost, detail),
            PostError::Retrieval(msg) => AppError::Internal(ErrorCode::FailedToGetPost, msg),
            PostError::Forbidden => AppError::Forbidden(ErrorCode::FailedToDeletePost, detail),
            PostError::NotLoggedIn => AppError::Unauthorized(ErrorCode::NotLoggedIn, detail),
            PostError::Roles(_) => AppError::BadGateway(ErrorCode::FailedToDeletePost, detail),
            PostError::Deletion(msg) => AppError::BadRequest(ErrorCode::FailedToDeletePost, msg),
            PostError::Count(msg) => AppError::Internal(ErrorCode::FailedToCountPosts, msg),
            PostError::Discussion(msg) => {
                // The remote payload is logged, not echoed back.
                tracing::error!(error = %msg, "Discussion enrichment failed");
                AppError::BadGateway(
                    ErrorCode::FailedToGetPost,
                    "Failed to fetch discussion data for post".to_string(),
                )
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingAuth => AppError::Unauthorized(
                ErrorCode::NotLoggedIn,
                "Please provide a valid Bearer token in the Authorization header.".to_string(),
            ),
            AuthError::TokenExpired => AppError::Unauthorized(
                ErrorCode::InvalidToken,
                "Your authentication token has expired. Please login again.".to_string(),
            ),
            AuthError::InvalidToken(msg) => AppError::Unauthorized(ErrorCode::InvalidToken, msg),
        }
    }
}

// Extractor failures, registered through `JsonConfig`, `PathConfig` and
// `QueryConfig` so malformed requests get the same problem body.

/// Malformed create payload.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(ErrorCode::FailedToCreatePost, err.to_string()).into()
}

/// Unparseable path segment, such as a post id that is not a UUID.
pub fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let code = if *req.method() == Method::DELETE {
        ErrorCode::FailedToDeletePost
    } else {
        ErrorCode::FailedToGetPost
    };
    AppError::BadRequest(code, err.to_string()).into()
}

/// Malformed query string.
pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(ErrorCode::FailedToGetPost, err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
