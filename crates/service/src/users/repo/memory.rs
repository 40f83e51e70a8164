use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::users::domain::User;
use crate::users::repository::UserStore;

/// Process-local store. Used for local runs and as the test double; an
/// outage can be simulated with [`MemoryUserStore::set_unavailable`].
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    unavailable: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self { Self::default() }

    /// While set, every call fails with `ServiceError::Store`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), ServiceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ServiceError::Store("user store unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn put(&self, user: User) -> Result<(), ServiceError> {
        self.check_available()?;
        self.users.write().await.insert(user.id.clone(), user);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<User>, ServiceError> {
        self.check_available()?;
        Ok(self.users.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> User {
        User { id: id.into(), name: name.into(), email: format!("{name}@example.com") }
    }

    #[tokio::test]
    async fn put_then_get() -> Result<(), ServiceError> {
        let store = MemoryUserStore::new();
        assert!(store.get("u1").await?.is_none());
        store.put(user("u1", "ada")).await?;
        assert_eq!(store.get("u1").await?, Some(user("u1", "ada")));
        Ok(())
    }

    #[tokio::test]
    async fn put_overwrites_same_id() -> Result<(), ServiceError> {
        let store = MemoryUserStore::new();
        store.put(user("u1", "ada")).await?;
        store.put(user("u1", "grace")).await?;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("u1").await?.map(|u| u.name), Some("grace".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn outage_fails_both_operations() {
        let store = MemoryUserStore::new();
        store.set_unavailable(true);
        assert!(matches!(store.put(user("u1", "ada")).await, Err(ServiceError::Store(_))));
        assert!(matches!(store.get("u1").await, Err(ServiceError::Store(_))));
        store.set_unavailable(false);
        assert!(store.get("u1").await.unwrap().is_none());
    }
}
