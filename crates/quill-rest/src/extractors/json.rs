//! JSON body extractor with enveloped errors.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use quill_core::QuillError;
use serde::de::DeserializeOwned;

/// Like [`Json`], but a body that fails to parse is reported as a
/// validation error in the standard envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                QuillError::validation(format!("Invalid JSON: {}", rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}
