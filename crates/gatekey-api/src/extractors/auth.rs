//! `AuthUser` extractor — pulls the access token from the request, validates, and injects claims.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use gatekey_auth::Claims;
use gatekey_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "token";

/// Extracted authenticated user context available in handlers.
///
/// The token is taken from the `Authorization: Bearer` header when
/// present, otherwise from the `token` cookie. Only the verified token
/// is trusted; the `userID` cookie is never consulted here.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the verified claims.
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Claims;
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
        let bearer = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_owned);

        let token = match bearer {
            Some(token) => token,
            None => {
                let jar = CookieJar::from_headers(&parts.headers);
                jar.get(ACCESS_TOKEN_COOKIE)
                    .map(|c| c.value().to_owned())
                    .ok_or_else(|| {
                        ApiError(
                            AppError::authentication("Missing access token")
                                .in_operation("AuthUser.extract"),
                        )
                    })?
            }
        };

        let claims = state.session_manager.verify_access(&token)?;

        Ok(AuthUser(claims))
    }
}
