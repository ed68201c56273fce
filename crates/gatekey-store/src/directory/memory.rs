//! In-memory user directory.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use gatekey_core::error::AppError;
use gatekey_core::result::AppResult;
use gatekey_entity::user::UserIdentity;

use super::{PasswordHasher, UserDirectory};

/// A user record held by the directory. The password hash never leaves
/// this module.
#[derive(Debug, Clone)]
struct UserRecord {
    identity: UserIdentity,
    password_hash: String,
}

/// In-memory user directory with Argon2id password hashing.
///
/// Single-node only; a durable directory lives behind the same trait in
/// a real deployment.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    /// Records keyed by login.
    by_login: DashMap<String, UserRecord>,
    /// Login lookup by user id.
    by_id: DashMap<Uuid, String>,
    /// Password hasher.
    hasher: PasswordHasher,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn create_user(&self, login: &str, password: &str) -> AppResult<UserIdentity> {
        if login.is_empty() || password.is_empty() {
            return Err(AppError::validation("login and password are required")
                .in_operation("UserDirectory.create_user"));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let identity = UserIdentity::new(login);

        // DashMap entry keeps concurrent signups for one login from both
        // succeeding.
        match self.by_login.entry(login.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(AppError::conflict(
                format!("login '{login}' already created"),
            )
            .in_operation("UserDirectory.create_user")),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                self.by_id.insert(identity.id, login.to_string());
                slot.insert(UserRecord {
                    identity: identity.clone(),
                    password_hash,
                });
                Ok(identity)
            }
        }
    }

    async fn verify_credentials(&self, login: &str, password: &str) -> AppResult<UserIdentity> {
        let record = self
            .by_login
            .get(login)
            .map(|r| r.value().clone())
            .ok_or_else(|| {
                AppError::not_found(format!("no user '{login}'"))
                    .in_operation("UserDirectory.verify_credentials")
            })?;

        if self
            .hasher
            .verify_password(password, &record.password_hash)?
        {
            Ok(record.identity)
        } else {
            Err(AppError::authentication("wrong login or password")
                .in_operation("UserDirectory.verify_credentials"))
        }
    }

    async fn lookup(&self, id: Uuid) -> AppResult<UserIdentity> {
        let login = self.by_id.get(&id).map(|l| l.value().clone()).ok_or_else(|| {
            AppError::not_found(format!("no user with id {id}")).in_operation("UserDirectory.lookup")
        })?;

        self.by_login
            .get(&login)
            .map(|r| r.value().identity.clone())
            .ok_or_else(|| {
                AppError::not_found(format!("no user '{login}'"))
                    .in_operation("UserDirectory.lookup")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekey_core::error::ErrorKind;

    #[tokio::test]
    async fn test_create_then_verify() {
        let dir = MemoryUserDirectory::new();
        let created = dir.create_user("alice", "pw1").await.unwrap();

        let verified = dir.verify_credentials("alice", "pw1").await.unwrap();
        assert_eq!(verified, created);
    }

    #[tokio::test]
    async fn test_duplicate_login_conflicts() {
        let dir = MemoryUserDirectory::new();
        dir.create_user("alice", "pw1").await.unwrap();

        let err = dir.create_user("alice", "pw2").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_wrong_password_vs_unknown_user() {
        let dir = MemoryUserDirectory::new();
        dir.create_user("alice", "pw1").await.unwrap();

        let wrong = dir.verify_credentials("alice", "nope").await.unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Authentication);

        let unknown = dir.verify_credentials("bob", "pw1").await.unwrap_err();
        assert_eq!(unknown.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_by_id() {
        let dir = MemoryUserDirectory::new();
        let created = dir.create_user("alice", "pw1").await.unwrap();

        let found = dir.lookup(created.id).await.unwrap();
        assert_eq!(found.login, "alice");

        let missing = dir.lookup(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(missing.kind, ErrorKind::NotFound);
    }
}
