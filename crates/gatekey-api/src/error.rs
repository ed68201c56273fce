//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gatekey_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Name of the operation that failed. Always present in the body,
    /// null when no operation was recorded.
    pub context: Option<String>,
}

/// Newtype over [`AppError`] carrying the HTTP mapping.
///
/// Handlers return `Result<_, ApiError>` so domain errors propagate
/// through `?` and render with a consistent body shape.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            // NotFound and Conflict collapse into 401 so the register
            // and login endpoints cannot be used to probe which logins
            // exist.
            ErrorKind::Authentication | ErrorKind::NotFound | ErrorKind::Conflict => {
                StatusCode::UNAUTHORIZED
            }
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Store
            | ErrorKind::Signing
            | ErrorKind::Configuration
            | ErrorKind::Internal => {
                tracing::error!(
                    error = %err.message,
                    context = err.operation().unwrap_or("unknown"),
                    "Internal server error"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: err.message.clone(),
            context: err.context.clone(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_unauthorized() {
        let resp = ApiError(AppError::conflict("login taken")).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let resp = ApiError(AppError::validation("bad cookie")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_forbidden_maps_to_forbidden() {
        let resp = ApiError(AppError::forbidden("no cookie")).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
