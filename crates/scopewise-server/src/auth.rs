//! Bearer-token guard for admin endpoints.
//!
//! Admin handlers take an [`Admin`] argument. The request is rejected before
//! the handler runs unless `Authorization: Bearer <token>` matches the
//! configured admin token.

use crate::error::ServerError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

/// Proof that the request carried the admin token.
#[derive(Debug, Clone, Copy)]
pub struct Admin;

impl FromRequestParts<AppState> for Admin {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.admin_token().ok_or(ServerError::AdminDisabled)?;
        match extract_bearer(&parts.headers) {
            Some(token) if token == expected => Ok(Admin),
            _ => {
                tracing::warn!(path = %parts.uri.path(), "Rejected admin request");
                Err(ServerError::AuthenticationFailed)
            }
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Bearer  s3cret "));
        assert_eq!(extract_bearer(&headers), Some("s3cret"));

        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer(&headers), None);
    }
}
