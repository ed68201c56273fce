//! JSON body extractor whose rejection renders as an API error.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use gatekey_core::error::AppError;

use crate::error::ApiError;

/// Drop-in replacement for `axum::Json` on request bodies.
///
/// Axum's own rejection answers malformed JSON with a plain-text 422;
/// the auth endpoints must answer 400 with the `{error, context}` body,
/// so the rejection is remapped here.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError(
                AppError::validation(format!("cannot unpack request payload: {rejection}"))
                    .in_operation("ApiJson.extract"),
            )),
        }
    }
}
