//! Session storage: one record per user, whole-record writes.

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "redis-backend")]
pub mod redis;

mod backend;

pub use backend::SessionBackend;

use async_trait::async_trait;
use uuid::Uuid;

use gatekey_core::result::AppResult;
use gatekey_entity::session::Session;

/// Trait for session store backends.
///
/// The store maps a user id to that user's current session record. No
/// read-modify-write protection is provided: concurrent logins for the
/// same user race and the last writer wins, an accepted weak-consistency
/// policy for this design.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Unconditionally writes or overwrites the session record for its
    /// owner. The record expires with the refresh token, so stale
    /// sessions self-clean without an explicit sweep.
    async fn put(&self, session: &Session) -> AppResult<()>;

    /// Point lookup of a user's current session. `Ok(None)` is the
    /// normal "never logged in / expired and reaped" outcome, not an
    /// infrastructure failure.
    async fn check(&self, user_id: Uuid) -> AppResult<Option<Session>>;

    /// Removes the session record. Deleting an absent session is not an
    /// error.
    async fn delete(&self, user_id: Uuid) -> AppResult<()>;
}
