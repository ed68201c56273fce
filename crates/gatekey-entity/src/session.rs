//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The current session for a user: the token pair and its expiry.
///
/// At most one session exists per user. Sessions are created on signup
/// or login, overwritten wholesale on a later login, and deleted on
/// logout — the record is never partially mutated. The access and
/// refresh tokens were minted together and must stay a matched pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// When the session expires (refresh-token lifetime).
    pub expires_at: DateTime<Utc>,
    /// When the session was created (signup or login time).
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
