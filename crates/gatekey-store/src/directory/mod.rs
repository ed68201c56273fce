//! The user directory: the credential-verifier boundary.
//!
//! The durable user record store is an external collaborator; this
//! module defines the capability GateKey consumes and ships an
//! in-memory implementation so the server and tests are self-contained.

mod memory;
mod password;

pub use memory::MemoryUserDirectory;
pub use password::PasswordHasher;

use async_trait::async_trait;
use uuid::Uuid;

use gatekey_core::result::AppResult;
use gatekey_entity::user::UserIdentity;

/// Trait for the external user directory.
///
/// Error kinds the implementations produce: `Conflict` when a login is
/// already taken, `Authentication` when a password does not match,
/// `NotFound` when no such user exists. Callers on the login path must
/// collapse the latter two before anything reaches a client.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Creates a new user record for `(login, password)`.
    async fn create_user(&self, login: &str, password: &str) -> AppResult<UserIdentity>;

    /// Authenticates `(login, password)` against the directory.
    async fn verify_credentials(&self, login: &str, password: &str) -> AppResult<UserIdentity>;

    /// Looks up a user by id.
    async fn lookup(&self, id: Uuid) -> AppResult<UserIdentity>;
}
