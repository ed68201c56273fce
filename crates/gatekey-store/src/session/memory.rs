//! In-memory session store using the moka crate.

use async_trait::async_trait;
use moka::future::Cache;
use uuid::Uuid;

use gatekey_core::config::store::MemoryStoreConfig;
use gatekey_core::result::AppResult;
use gatekey_entity::session::Session;

use super::SessionStore;

/// In-memory session store.
///
/// Single-node only. Expiry uses moka's cache-level TTL set to the
/// refresh-token lifetime; the record's own `expires_at` stays the
/// authoritative value for callers.
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    /// The underlying moka cache, keyed by user id.
    cache: Cache<Uuid, Session>,
}

impl MemorySessionStore {
    /// Create a new in-memory store from configuration.
    pub fn new(config: &MemoryStoreConfig, session_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(std::time::Duration::from_secs(session_ttl_seconds))
            .build();

        Self { cache }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, session: &Session) -> AppResult<()> {
        self.cache.insert(session.user_id, session.clone()).await;
        Ok(())
    }

    async fn check(&self, user_id: Uuid) -> AppResult<Option<Session>> {
        Ok(self.cache.get(&user_id).await)
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        self.cache.remove(&user_id).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn make_store() -> MemorySessionStore {
        let config = MemoryStoreConfig { max_capacity: 1000 };
        MemorySessionStore::new(&config, 3600)
    }

    fn make_session(user_id: Uuid) -> Session {
        let now = Utc::now();
        Session {
            user_id,
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: now + Duration::hours(24),
            created_at: now,
        }
    }

    #[tokio::test]
    async fn test_put_then_check() {
        let store = make_store();
        let user_id = Uuid::new_v4();
        store.put(&make_session(user_id)).await.unwrap();

        let found = store.check(user_id).await.unwrap();
        assert_eq!(found.unwrap().user_id, user_id);
    }

    #[tokio::test]
    async fn test_check_unknown_user_is_none() {
        let store = make_store();
        let found = store.check(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_whole_record() {
        let store = make_store();
        let user_id = Uuid::new_v4();
        store.put(&make_session(user_id)).await.unwrap();

        let mut replacement = make_session(user_id);
        replacement.access_token = "access-2".to_string();
        replacement.refresh_token = "refresh-2".to_string();
        store.put(&replacement).await.unwrap();

        let found = store.check(user_id).await.unwrap().unwrap();
        assert_eq!(found.access_token, "access-2");
        assert_eq!(found.refresh_token, "refresh-2");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = make_store();
        let user_id = Uuid::new_v4();
        store.put(&make_session(user_id)).await.unwrap();

        store.delete(user_id).await.unwrap();
        assert!(store.check(user_id).await.unwrap().is_none());

        // Deleting again is not an error.
        store.delete(user_id).await.unwrap();
    }
}
