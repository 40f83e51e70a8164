use std::{collections::HashMap, hash::Hash, path::{Path, PathBuf}, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Keeps a `HashMap<K, V>` in memory and rewrites the whole file on every
/// insert. Writes go to a sibling `.tmp` file which is then renamed over the
/// original, so a crash mid-write never leaves a truncated map behind.
#[derive(Clone)]
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, creating the file with an empty map if missing.
    ///
    /// An existing file that does not parse is an error rather than an empty map.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Store(format!("corrupt store file {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                write_atomic(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::store(e)),
        };
        debug!(path = %file_path.display(), entries = map.len(), "json map store opened");

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or overwrite a value by key and persist.
    ///
    /// The in-memory map is only updated once the file write succeeded.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let previous = map.insert(key.clone(), value);
        if let Err(e) = write_atomic(&self.file_path, &*map).await {
            match previous {
                Some(v) => map.insert(key, v),
                None => map.remove(&key),
            };
            return Err(e);
        }
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

async fn write_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec(value).map_err(ServiceError::store)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, data).await.map_err(ServiceError::store)?;
    fs::rename(&tmp, path).await.map_err(ServiceError::store)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("json_map_store_{tag}_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn json_map_store_persists_across_reopen() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("persist");
        let store = JsonMapStore::<String, String>::open(&tmp).await?;

        assert!(store.is_empty().await);

        store.insert("a".into(), "1".into()).await?;
        store.insert("b".into(), "2".into()).await?;
        store.insert("a".into(), "10".into()).await?;
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("10"));

        let reopened = JsonMapStore::<String, String>::open(&tmp).await?;
        assert_eq!(reopened.len().await, 2);
        assert_eq!(reopened.get(&"b".into()).await.as_deref(), Some("2"));
        assert!(reopened.get(&"c".into()).await.is_none());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_rejected() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("corrupt");
        tokio::fs::write(&tmp, b"not json").await?;
        let res = JsonMapStore::<String, String>::open(&tmp).await;
        assert!(matches!(res, Err(ServiceError::Store(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_insert_restores_previous_value() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("rollback");
        let store = JsonMapStore::<String, String>::open(&tmp).await?;
        store.insert("a".into(), "1".into()).await?;

        tokio::fs::remove_file(&tmp).await?;
        tokio::fs::create_dir(&tmp).await?;

        assert!(matches!(store.insert("a".into(), "2".into()).await, Err(ServiceError::Store(_))));
        assert!(matches!(store.insert("b".into(), "3".into()).await, Err(ServiceError::Store(_))));
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("1"));
        assert!(store.get(&"b".into()).await.is_none());
        assert_eq!(store.len().await, 1);

        let _ = tokio::fs::remove_dir(&tmp).await;
        let _ = tokio::fs::remove_file(tmp.with_extension("tmp")).await;
        Ok(())
    }
}
