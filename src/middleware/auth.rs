use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Principal resolved by [`require_auth`] for the current request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Token guard for protected routes.
///
/// The `Authorization` header carries the token itself, no scheme prefix.
/// Every failure (missing header, bad token, principal no longer exists,
/// store error) is the same 403 and the handler never runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Rejected request without usable Authorization header");
        ApiError::permission_denied()
    })?;

    let user_id = state.tokens.verify(token).map_err(|e| {
        tracing::warn!("Rejected token: {}", e);
        ApiError::permission_denied()
    })?;

    // The principal must still exist.
    let user = state.store.get_user_by_id(user_id).await.map_err(|e| {
        tracing::warn!("Rejected token for user {}: {}", user_id, e);
        ApiError::permission_denied()
    })?;

    request.extensions_mut().insert(AuthUser { user_id: user.id });

    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(ApiError::permission_denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn token_is_the_trimmed_header_value() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("   "));
        assert_eq!(extract_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("  abc.def.ghi \t"));
        assert_eq!(extract_token(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_token(&headers), Some("Bearer abc.def.ghi"));
    }
}
