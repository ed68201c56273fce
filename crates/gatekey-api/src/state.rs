//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use gatekey_auth::SessionManager;
use gatekey_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
}

impl AppState {
    /// Creates the application state.
    pub fn new(config: Arc<AppConfig>, session_manager: Arc<SessionManager>) -> Self {
        Self {
            config,
            session_manager,
        }
    }
}
