//! # gatekey-store
//!
//! Session persistence and the user directory boundary for GateKey.
//!
//! ## Modules
//!
//! - `session` — the [`SessionStore`] trait with Redis and in-memory
//!   backends, selected by configuration
//! - `directory` — the [`UserDirectory`] trait (the credential-verifier
//!   seam) and an in-memory implementation with Argon2id hashing

pub mod directory;
pub mod session;

pub use directory::{MemoryUserDirectory, UserDirectory};
pub use session::{SessionBackend, SessionStore};
