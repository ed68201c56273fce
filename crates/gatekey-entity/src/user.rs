//! User identity model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An identity owned by the external user directory.
///
/// Immutable once created. Sessions reference the identity by `id`;
/// the record itself is never copied into the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub login: String,
}

impl UserIdentity {
    /// Creates an identity with a fresh random id.
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            login: login.into(),
        }
    }
}
