use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::SessionClaims;

use crate::shared::error::ApiError;

/// Session claims placed in the request by `require_auth`.
/// Usage in handlers: `async fn handler(CurrentSession(claims): CurrentSession)`
pub struct CurrentSession(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| ApiError::Unauthorized("Not signed in".to_string()))
    }
}
