//! JWT claims structure used in access and refresh tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current claims record version. Bumped whenever the record shape
/// changes; the decoder rejects anything else.
pub const CLAIMS_VERSION: u8 = 1;

/// The fixed claims record embedded in every token.
///
/// One shape serves both token profiles; access and refresh tokens
/// differ only in the TTL the caller picks at issuance. Claims are
/// never trusted without going through [`TokenDecoder`](super::TokenDecoder).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Login name at the time of issuance, for convenience.
    pub login: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Claims record version.
    pub ver: u8,
}

impl Claims {
    /// Checks whether this token has expired, with no leeway. The
    /// lifecycle manager re-checks this after signature verification.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
