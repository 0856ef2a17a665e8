//! Request extractors whose rejections use the JSON error body.

use axum::async_trait;
use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;
use tracing::debug;

use crate::errors::JsonApiError;

/// `Json<T>` that answers malformed or mistyped bodies with a 400
/// `{ "error", "message" }` instead of axum's plain-text rejection.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(status = %rejection.status(), "json body rejected");
                Err(JsonApiError::bad_request(rejection.body_text()))
            }
        }
    }
}
