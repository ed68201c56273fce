//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use gatekey_core::config::auth::AuthConfig;
use gatekey_core::error::AppError;
use gatekey_entity::user::UserIdentity;

use super::claims::{CLAIMS_VERSION, Claims};

/// Creates signed JWT access and refresh tokens.
///
/// The signing key is fixed at construction; there is no ambient key
/// lookup and no runtime rotation.
#[derive(Clone)]
pub struct TokenEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in hours.
    refresh_ttl_hours: i64,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .finish()
    }
}

/// A matched access/refresh pair minted together. Tokens from different
/// pairs must never be mixed in one session record.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_hours: config.refresh_ttl_hours as i64,
        }
    }

    /// Encodes the identity and an absolute expiry into a signed token.
    ///
    /// Signing failure is fatal to the request, not to the process.
    pub fn issue(
        &self,
        identity: &UserIdentity,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: identity.id,
            login: identity.login.clone(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            ver: CLAIMS_VERSION,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::signing(format!("Failed to encode token: {e}")).in_operation("TokenEncoder.issue")
        })
    }

    /// Generates a new access + refresh token pair for the given identity.
    pub fn issue_pair(&self, identity: &UserIdentity) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_exp = now + chrono::Duration::minutes(self.access_ttl_minutes);
        let refresh_exp = now + chrono::Duration::hours(self.refresh_ttl_hours);

        let access_token = self.issue(identity, access_exp)?;
        let refresh_token = self.issue(identity, refresh_exp)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at: access_exp,
            refresh_expires_at: refresh_exp,
        })
    }

    /// Generates a standalone access token (after refresh).
    pub fn issue_access_token(
        &self,
        identity: &UserIdentity,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let exp = Utc::now() + chrono::Duration::minutes(self.access_ttl_minutes);
        let token = self.issue(identity, exp)?;
        Ok((token, exp))
    }
}
