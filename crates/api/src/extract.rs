//! Request extractors shared by handlers.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use setlist_core::error::CoreError;

use crate::error::AppError;

/// JSON body extractor that reports malformed payloads through [`AppError`].
///
/// Axum's plain `Json` rejects a body that fails to deserialize (e.g. a
/// string inside `child_ids`) with 422 and a text body; this maps every
/// rejection to a 400 `VALIDATION_ERROR` with the standard JSON envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(AppError::Core(CoreError::Validation(rejection.body_text()))),
        }
    }
}

/// Path parameter extractor with the same error envelope as [`ValidJson`].
///
/// A non-numeric id such as `/albums/abc/tracks` becomes a 400
/// `VALIDATION_ERROR` instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct ValidPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ValidPath(value)),
            Err(rejection) => Err(AppError::Core(CoreError::Validation(rejection.body_text()))),
        }
    }
}
