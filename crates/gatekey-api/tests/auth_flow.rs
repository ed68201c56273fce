//! End-to-end tests for the auth endpoints against in-memory backends.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use tower::ServiceExt;
use uuid::Uuid;

use gatekey_api::state::AppState;
use gatekey_api::build_router;
use gatekey_auth::{SessionManager, TokenDecoder, TokenEncoder};
use gatekey_entity::UserIdentity;
use gatekey_core::config::AppConfig;
use gatekey_core::config::store::MemoryStoreConfig;
use gatekey_store::directory::MemoryUserDirectory;
use gatekey_store::session::SessionBackend;
use gatekey_store::session::memory::MemorySessionStore;

fn test_app() -> (Router, AppConfig) {
    let config = AppConfig::default();

    let store = Arc::new(SessionBackend::from_store(Arc::new(
        MemorySessionStore::new(&MemoryStoreConfig { max_capacity: 100 }, 3600),
    )));
    let directory = Arc::new(MemoryUserDirectory::new());
    let manager = Arc::new(SessionManager::new(directory, store, &config.auth));

    let state = AppState::new(Arc::new(config.clone()), manager);
    (build_router(state), config)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Pulls a named cookie's value out of the Set-Cookie headers.
fn set_cookie_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|raw| {
            let (pair, _) = raw.split_once(';').unwrap_or((raw, ""));
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

async fn register(app: &Router, username: &str, password: &str) -> Response {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            serde_json::json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> Response {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            serde_json::json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_register_returns_auth_token() {
    let (app, _) = test_app();

    let response = register(&app, "alice", "password1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(!body["authToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_register_is_unauthorized() {
    let (app, _) = test_app();

    let first = register(&app, "alice", "password1").await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = register(&app, "alice", "password2").await;
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_requires_json_content_type() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"username":"alice","password":"pw"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request_with_error_shape() {
    let (app, _) = test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/login",
            serde_json::json!({ "username": "alice" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The body keeps the `{error, context}` shape even for bodies axum
    // itself refuses to deserialize.
    let body = body_json(response).await;
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert!(body["context"].is_string());
}

#[tokio::test]
async fn test_login_sets_session_cookies() {
    let (app, _) = test_app();
    register(&app, "alice", "password1").await;

    let response = login(&app, "alice", "password1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = set_cookie_value(&response, "token").unwrap();
    let refresh = set_cookie_value(&response, "refresh_token").unwrap();
    let user_id = set_cookie_value(&response, "userID").unwrap();
    assert!(!token.is_empty());
    assert!(!refresh.is_empty());
    assert!(Uuid::parse_str(&user_id).is_ok());

    let body = body_json(response).await;
    assert_eq!(body["accessToken"].as_str().unwrap(), token);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _) = test_app();
    register(&app, "alice", "password1").await;

    let wrong_password = login(&app, "alice", "wrong").await;
    let unknown_user = login(&app, "bob", "password1").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_user).await;
    assert_eq!(a["error"], b["error"]);
}

#[tokio::test]
async fn test_refresh_returns_fresh_access_token() {
    let (app, config) = test_app();
    register(&app, "alice", "password1").await;

    let login_resp = login(&app, "alice", "password1").await;
    let refresh_cookie = set_cookie_value(&login_resp, "refresh_token").unwrap();
    let user_id = set_cookie_value(&login_resp, "userID").unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/refresh")
        .header(
            header::COOKIE,
            format!("refresh_token={refresh_cookie}; userID={user_id}"),
        )
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let new_token = set_cookie_value(&response, "token").unwrap();
    let body = body_json(response).await;
    assert_eq!(body["accessToken"].as_str().unwrap(), new_token);

    // The reissued token belongs to the same subject.
    let claims = TokenDecoder::new(&config.auth).verify(&new_token).unwrap();
    assert_eq!(claims.sub, Uuid::parse_str(&user_id).unwrap());
}

#[tokio::test]
async fn test_refresh_without_cookies_is_forbidden() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/refresh")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_refresh_with_malformed_user_id_is_bad_request() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/refresh")
        .header(
            header::COOKIE,
            "refresh_token=whatever; userID=not-a-uuid",
        )
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_with_garbage_token_is_unauthorized() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/refresh")
        .header(
            header::COOKIE,
            format!("refresh_token=garbage; userID={}", Uuid::new_v4()),
        )
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_expired_token_is_unauthorized() {
    let (app, config) = test_app();

    // A structurally valid, correctly signed refresh token whose expiry
    // is well past the decoder's clock-skew leeway.
    let identity = UserIdentity::new("alice");
    let expired = TokenEncoder::new(&config.auth)
        .issue(&identity, chrono::Utc::now() - chrono::Duration::hours(1))
        .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/refresh")
        .header(
            header::COOKIE,
            format!("refresh_token={expired}; userID={}", identity.id),
        )
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_access_with_bearer_token() {
    let (app, _) = test_app();

    let register_resp = register(&app, "alice", "password1").await;
    let body = body_json(register_resp).await;
    let token = body["authToken"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("GET")
        .uri("/api/check_access")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_check_access_with_token_cookie() {
    let (app, _) = test_app();
    register(&app, "alice", "password1").await;

    let login_resp = login(&app, "alice", "password1").await;
    let token = set_cookie_value(&login_resp, "token").unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/check_access")
        .header(header::COOKIE, format!("token={token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_check_access_without_token_is_unauthorized() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/check_access")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_ok() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
