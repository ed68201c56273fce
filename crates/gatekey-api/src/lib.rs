//! # gatekey-api
//!
//! HTTP API layer for GateKey built on Axum.
//!
//! Provides the auth endpoints (register, login, refresh, check_access),
//! middleware (content-type enforcement, CORS, logging), extractors,
//! DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
