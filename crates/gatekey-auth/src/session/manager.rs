//! Session lifecycle manager — signup, login, refresh token flows.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use gatekey_core::config::auth::AuthConfig;
use gatekey_core::error::{AppError, ErrorKind};
use gatekey_core::result::AppResult;
use gatekey_entity::session::Session;
use gatekey_entity::user::UserIdentity;
use gatekey_store::directory::UserDirectory;
use gatekey_store::session::SessionStore;

use crate::jwt::encoder::TokenPair;
use crate::jwt::{Claims, TokenDecoder, TokenEncoder};

/// Result of a successful signup or login.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// The authenticated (or freshly created) identity.
    pub user: UserIdentity,
    /// The minted token pair.
    pub tokens: TokenPair,
}

/// Manages the complete session lifecycle.
///
/// Holds its collaborators as capabilities injected at construction;
/// nothing is looked up globally. Per user the observable state moves
/// `NoSession -> Active -> (Active | NoSession)`; the session store is
/// the only shared mutable resource and its consistency discipline is
/// last-writer-wins per user key.
#[derive(Clone)]
pub struct SessionManager {
    /// User directory (credential verifier boundary).
    directory: Arc<dyn UserDirectory>,
    /// Session persistence.
    store: Arc<dyn SessionStore>,
    /// Token encoder.
    encoder: TokenEncoder,
    /// Token decoder.
    decoder: TokenDecoder,
    /// Deadline applied to every directory/store call.
    call_deadline: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("call_deadline", &self.call_deadline)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        store: Arc<dyn SessionStore>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            directory,
            store,
            encoder: TokenEncoder::new(config),
            decoder: TokenDecoder::new(config),
            call_deadline: Duration::from_secs(config.call_deadline_seconds),
        }
    }

    /// The decoder, for callers that gate requests on access tokens.
    pub fn decoder(&self) -> &TokenDecoder {
        &self.decoder
    }

    /// Performs the signup flow:
    ///
    /// 1. Create the user record in the directory
    /// 2. Mint an access/refresh pair
    /// 3. Unconditionally store the session — a brand-new user cannot
    ///    already have one
    ///
    /// A crash between steps 1 and 3 leaves a user with no session,
    /// which self-heals on the next login.
    pub async fn signup(&self, login: &str, password: &str) -> AppResult<AuthOutcome> {
        let user = self
            .bounded("UserDirectory.create_user", self.directory.create_user(login, password))
            .await?;

        let tokens = self.encoder.issue_pair(&user)?;

        self.bounded(
            "SessionStore.put",
            self.store.put(&Self::session_record(&user, &tokens)),
        )
        .await?;

        info!(user_id = %user.id, "Signup successful");
        Ok(AuthOutcome { user, tokens })
    }

    /// Performs the login flow:
    ///
    /// 1. Verify credentials against the directory
    /// 2. Mint a fresh token pair — tokens are always reissued on login
    /// 3. Overwrite the stored session with the new pair, whether or
    ///    not one already existed, so the store stays authoritative
    pub async fn login(&self, login: &str, password: &str) -> AppResult<AuthOutcome> {
        let user = self
            .bounded(
                "UserDirectory.verify_credentials",
                self.directory.verify_credentials(login, password),
            )
            .await
            .map_err(|e| match e.kind {
                // An unknown login and a wrong password must be
                // indistinguishable to the caller.
                ErrorKind::NotFound | ErrorKind::Authentication => {
                    AppError::authentication("invalid login or password")
                        .in_operation("UserDirectory.verify_credentials")
                }
                _ => e,
            })?;

        let tokens = self.encoder.issue_pair(&user)?;

        let existing = self
            .bounded("SessionStore.check", self.store.check(user.id))
            .await?;
        match existing {
            Some(old) if old.is_expired() => {
                info!(user_id = %user.id, "Replacing aged-out session")
            }
            Some(_) => info!(user_id = %user.id, "Replacing live session"),
            None => info!(user_id = %user.id, "Creating first session"),
        }

        self.bounded(
            "SessionStore.put",
            self.store.put(&Self::session_record(&user, &tokens)),
        )
        .await?;

        info!(user_id = %user.id, "Login successful");
        Ok(AuthOutcome { user, tokens })
    }

    /// Refreshes an access token using a valid refresh token.
    ///
    /// The refresh token and the stored session are not rotated: only
    /// the access token is reissued, and the session store is never
    /// consulted. A deleted session's refresh token therefore remains
    /// usable until its natural expiry.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        user_id: Uuid,
    ) -> AppResult<(String, DateTime<Utc>)> {
        let claims = self.decoder.verify(refresh_token)?;

        // Re-check expiry against the wall clock even after the codec
        // accepted the token; the codec allows a little clock-skew
        // leeway, this check does not.
        if claims.is_expired() {
            return Err(AppError::authentication("Refresh token has expired")
                .in_operation("SessionManager.refresh"));
        }

        if claims.sub != user_id {
            warn!(token_sub = %claims.sub, cookie_user = %user_id, "Refresh subject mismatch");
            return Err(AppError::authentication("Refresh token does not match user")
                .in_operation("SessionManager.refresh"));
        }

        let user = self
            .bounded("UserDirectory.lookup", self.directory.lookup(user_id))
            .await?;

        let (access_token, expires_at) = self.encoder.issue_access_token(&user)?;

        info!(user_id = %user.id, "Access token refreshed");
        Ok((access_token, expires_at))
    }

    /// Removes the stored session for a user. Idempotent.
    pub async fn logout(&self, user_id: Uuid) -> AppResult<()> {
        self.bounded("SessionStore.delete", self.store.delete(user_id))
            .await?;
        info!(user_id = %user_id, "Logout completed");
        Ok(())
    }

    /// Verifies an access token presented on a gated request.
    pub fn verify_access(&self, token: &str) -> AppResult<Claims> {
        self.decoder.verify(token)
    }

    fn session_record(user: &UserIdentity, tokens: &TokenPair) -> Session {
        Session {
            user_id: user.id,
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at: tokens.refresh_expires_at,
            created_at: Utc::now(),
        }
    }

    /// Bounds a collaborator call by the configured deadline; a timeout
    /// surfaces as a store-class error, never a silent hang.
    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.call_deadline, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::store(format!(
                "call exceeded {}s deadline",
                self.call_deadline.as_secs()
            ))
            .in_operation(operation)),
        }
    }
}
