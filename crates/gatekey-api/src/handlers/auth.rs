//! Auth handlers — register, login, refresh, check_access.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, Expiration, SameSite};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use gatekey_core::error::AppError;

use crate::dto::request::AuthRequest;
use crate::dto::response::{AccessTokenResponse, RegisterResponse};
use crate::extractors::auth::ACCESS_TOKEN_COOKIE;
use crate::extractors::{ApiJson, AuthUser};
use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
/// Name of the cookie carrying the user id for the refresh flow.
pub const USER_ID_COOKIE: &str = "userID";

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AuthRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()).in_operation("register"))?;

    let outcome = state
        .session_manager
        .signup(&req.username, &req.password)
        .await?;

    Ok(Json(RegisterResponse {
        auth_token: outcome.tokens.access_token,
    }))
}

/// POST /api/login
///
/// On success sets three cookies: `token` (access, HTTP-only),
/// `refresh_token` (HTTP-only), and `userID` (readable by the client,
/// used only to key the refresh flow).
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<AuthRequest>,
) -> Result<(CookieJar, Json<AccessTokenResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()).in_operation("login"))?;

    let outcome = state
        .session_manager
        .login(&req.username, &req.password)
        .await?;

    let tokens = &outcome.tokens;
    let jar = jar
        .add(session_cookie(
            ACCESS_TOKEN_COOKIE,
            tokens.access_token.clone(),
            tokens.access_expires_at,
            true,
        ))
        .add(session_cookie(
            REFRESH_TOKEN_COOKIE,
            tokens.refresh_token.clone(),
            tokens.refresh_expires_at,
            true,
        ))
        .add(session_cookie(
            USER_ID_COOKIE,
            outcome.user.id.to_string(),
            tokens.refresh_expires_at,
            false,
        ));

    Ok((
        jar,
        Json(AccessTokenResponse {
            access_token: tokens.access_token.clone(),
        }),
    ))
}

/// GET /api/refresh
///
/// Reads the `refresh_token` and `userID` cookies; on success returns a
/// fresh access token and updates the `token` cookie. The refresh token
/// itself is not rotated.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AccessTokenResponse>), ApiError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or_else(|| {
            AppError::forbidden("Missing refresh token cookie").in_operation("refresh")
        })?;

    let user_cookie = jar
        .get(USER_ID_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or_else(|| AppError::forbidden("Missing userID cookie").in_operation("refresh"))?;

    let user_id = Uuid::parse_str(&user_cookie)
        .map_err(|_| AppError::validation("userID cookie is not a valid UUID").in_operation("refresh"))?;

    let (access_token, expires_at) = state
        .session_manager
        .refresh(&refresh_token, user_id)
        .await?;

    let jar = jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        access_token.clone(),
        expires_at,
        true,
    ));

    Ok((jar, Json(AccessTokenResponse { access_token })))
}

/// GET /api/check_access
///
/// The `AuthUser` extractor performs the token verification; reaching
/// the handler body means the caller holds a valid access token.
pub async fn check_access(_user: AuthUser) -> StatusCode {
    StatusCode::OK
}

fn session_cookie(
    name: &'static str,
    value: String,
    expires_at: DateTime<Utc>,
    http_only: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(http_only)
        .expires(cookie_expiry(expires_at))
        .build()
}

fn cookie_expiry(expires_at: DateTime<Utc>) -> Expiration {
    OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
        .map(Expiration::DateTime)
        .unwrap_or(Expiration::Session)
}
