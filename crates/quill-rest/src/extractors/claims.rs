//! Authenticated actor extractor.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use quill_core::{QuillError, UserId};
use quill_security::Claims;

/// The verified actor of a request.
///
/// Requires an `Authorization: Bearer` header whose token the auth
/// middleware accepted.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub claims: Claims,
}

impl AuthenticatedUser {
    /// The actor in the form the services take.
    #[must_use]
    pub const fn actor(&self) -> Option<UserId> {
        Some(self.id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| QuillError::unauthorized("Missing or malformed authorization header"))?;

        // absent claims: the middleware rejected the token
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| QuillError::unauthorized("Invalid or expired token"))?;

        let id = claims
            .user_id()
            .ok_or_else(|| QuillError::InvalidToken("Token subject is not a user".to_string()))?;

        Ok(Self { id, claims })
    }
}
