/// Authenticated request context
///
/// The API's auth middleware validates the bearer token and inserts an
/// [`AuthContext`] into request extensions; handlers pull it back out with
/// `Extension<AuthContext>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// Identity of the authenticated user for the current request
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user's id (from the token's `sub` claim)
    pub user_id: Uuid,
}

/// Authentication failures surfaced by the middleware
///
/// Every variant maps to the same 401 body so clients cannot distinguish
/// a missing header from an expired or forged token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header, or not a Bearer scheme
    #[error("Missing or malformed Authorization header")]
    MissingToken,

    /// Token failed validation
    #[error("Invalid or expired token")]
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": "Authentication required"
        }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Extracts the bearer token from an Authorization header value
///
/// Accepts only the `Bearer <token>` scheme.
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("Bearer  abc123"), Some("abc123"));
    }

    #[test]
    fn test_extract_bearer_token_rejects_other_schemes() {
        assert_eq!(extract_bearer_token("Basic abc123"), None);
        assert_eq!(extract_bearer_token("abc123"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token(""), None);
    }

    #[test]
    fn test_auth_context_clone() {
        let ctx = AuthContext {
            user_id: Uuid::new_v4(),
        };
        let cloned = ctx.clone();
        assert_eq!(ctx.user_id, cloned.user_id);
    }
}
