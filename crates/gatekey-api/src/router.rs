//! Route definitions for the GateKey HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    // Body-carrying routes must declare a JSON content type; the check
    // runs before any handler.
    let json_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route_layer(axum_middleware::from_fn(
            middleware::content_type::require_json,
        ));

    let api_routes = json_routes
        .route("/refresh", get(handlers::auth::refresh))
        .route("/check_access", get(handlers::auth::check_access))
        .route("/health", get(handlers::health::health));

    let cors = build_cors_layer(&state.config.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}
