//! Enforces `Content-Type: application/json` on mutating endpoints.

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use gatekey_core::error::AppError;

use crate::error::ApiError;

/// Rejects the request with 400 before the handler runs unless the
/// `Content-Type` header is `application/json` (parameters such as a
/// charset are accepted).
pub async fn require_json(request: Request, next: Next) -> Response {
    let is_json = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.trim_start()
                .to_ascii_lowercase()
                .starts_with("application/json")
        })
        .unwrap_or(false);

    if !is_json {
        return ApiError(
            AppError::validation("Content-Type must be application/json")
                .in_operation("require_json"),
        )
        .into_response();
    }

    next.run(request).await
}
