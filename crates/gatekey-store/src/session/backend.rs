//! Session backend that dispatches to the configured store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use gatekey_core::config::store::StoreConfig;
use gatekey_core::error::AppError;
use gatekey_core::result::AppResult;
use gatekey_entity::session::Session;

use super::SessionStore;

/// Session backend that wraps the configured store implementation.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct SessionBackend {
    /// The inner session store.
    inner: Arc<dyn SessionStore>,
}

impl SessionBackend {
    /// Create a new session backend from configuration.
    ///
    /// `session_ttl_seconds` is the refresh-token lifetime; stored
    /// records expire with it.
    pub async fn new(config: &StoreConfig, session_ttl_seconds: u64) -> AppResult<Self> {
        let inner: Arc<dyn SessionStore> = match config.backend.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis session store");
                let store = crate::session::redis::RedisSessionStore::connect(&config.redis).await?;
                Arc::new(store)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory session store");
                let store = crate::session::memory::MemorySessionStore::new(
                    &config.memory,
                    session_ttl_seconds,
                );
                Arc::new(store)
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown session store backend: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a session backend from an existing store (for testing).
    pub fn from_store(store: Arc<dyn SessionStore>) -> Self {
        Self { inner: store }
    }
}

#[async_trait]
impl SessionStore for SessionBackend {
    async fn put(&self, session: &Session) -> AppResult<()> {
        self.inner.put(session).await
    }

    async fn check(&self, user_id: Uuid) -> AppResult<Option<Session>> {
        self.inner.check(user_id).await
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        self.inner.delete(user_id).await
    }
}
