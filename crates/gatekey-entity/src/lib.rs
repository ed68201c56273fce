//! # gatekey-entity
//!
//! Domain entity models for GateKey.

pub mod session;
pub mod user;

pub use session::Session;
pub use user::UserIdentity;
