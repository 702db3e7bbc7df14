//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};
use std::sync::Arc;

use posts_core::domain::Caller;
use posts_core::ports::{AuthError, TokenService};
use posts_shared::ErrorCode;

use super::error::AppError;

/// Authenticated caller extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    token: String,
}

impl Identity {
    /// The caller as passed to the post operations. The raw token travels
    /// along so the identity service can be asked for roles.
    pub fn caller(&self) -> Caller {
        Caller::new(self.user_id.clone(), Some(self.token.clone()))
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Get token service from app data
        let Some(token_service) = req.app_data::<actix_web::web::Data<Arc<dyn TokenService>>>()
        else {
            tracing::error!("TokenService not found in app data");
            return ready(Err(AppError::Internal(
                ErrorCode::InternalError,
                "Server configuration error".to_string(),
            )));
        };

        let result = bearer_token(req).and_then(|token| {
            let claims = token_service.validate_token(token)?;
            Ok(Identity {
                user_id: claims.user_id,
                token: token.to_string(),
            })
        });

        ready(result.map_err(|e| {
            tracing::debug!(error = %e, "Rejected request credentials");
            e.into()
        }))
    }
}
