//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing and lifetime configuration.
///
/// The signing key is loaded once at startup and never rotated at
/// runtime; the codec is constructed from this value and holds it as
/// immutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in hours. The session store's record TTL is
    /// matched to this value so stale sessions self-clean.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Deadline in seconds for each call to the user directory or the
    /// session store. A timeout surfaces as a store error, never as a
    /// silent hang.
    #[serde(default = "default_call_deadline")]
    pub call_deadline_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_hours: default_refresh_ttl(),
            call_deadline_seconds: default_call_deadline(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    24
}

fn default_call_deadline() -> u64 {
    5
}
