//! `AuthUser` extractor: pulls the bearer token from the Authorization header and validates it.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use moviehub_core::error::AppError;
use moviehub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Same wording as a rejected token, so a missing header reveals nothing extra.
const UNAUTHENTICATED: &str = "Invalid or expired token";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::authentication(UNAUTHENTICATED))?;

        let user_id = state.session_manager.authenticate_request(token)?;

        Ok(AuthUser(RequestContext::new(user_id)))
    }
}

/// Returns the token of an `Authorization: Bearer <token>` header, if well formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
