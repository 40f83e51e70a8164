use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;
use crate::users::domain::User;
use crate::users::repository::UserStore;

/// Users persisted as a JSON map `id -> record` in a single file.
#[derive(Clone)]
pub struct FileUserStore {
    store: Arc<JsonMapStore<String, User>>,
}

impl FileUserStore {
    /// Open the store, creating an empty file if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonMapStore::<String, User>::open(path).await?;
        Ok(Self { store })
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn put(&self, user: User) -> Result<(), ServiceError> {
        self.store.insert(user.id.clone(), user).await
    }

    async fn get(&self, id: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.store.get(&id.to_string()).await)
    }
}
