use std::{collections::HashMap, hash::Hash, io::ErrorKind, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// JSON file-backed key-value map.
///
/// The whole map is loaded on open and rewritten on every mutation. Writes go to a sibling
/// `.tmp` file that is renamed over the original, and the write lock is held until the
/// rename completes so the file always matches the in-memory map.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, creating an empty file (and parent directories) if missing.
    /// A file that exists but does not parse is an error rather than silently emptied.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::store)?;
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Store(format!("cannot parse {}: {e}", file_path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(ServiceError::store(e)),
        };

        let store = Self { inner: RwLock::new(map), file_path };
        {
            let map = store.inner.read().await;
            store.persist(&map).await?;
        }
        Ok(Arc::new(store))
    }

    async fn persist(&self, map: &HashMap<K, V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(map).map_err(ServiceError::store)?;
        let tmp = self.file_path.with_extension("json.tmp");
        fs::write(&tmp, data).await.map_err(ServiceError::store)?;
        fs::rename(&tmp, &self.file_path).await.map_err(ServiceError::store)?;
        Ok(())
    }

    pub async fn values(&self) -> Vec<V> {
        self.inner.read().await.values().cloned().collect()
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Insert or replace, then persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(key, value);
        self.persist(&map).await
    }

    /// Remove and persist; returns whether the key existed. Nothing is written when it did not.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        if map.remove(key).is_none() {
            return Ok(false);
        }
        self.persist(&map).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("json_map_store_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn insert_remove_and_reload() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = JsonMapStore::<String, String>::open(&tmp).await?;
        assert_eq!(store.len().await, 0);

        store.insert("a".into(), "1".into()).await?;
        store.insert("b".into(), "2".into()).await?;
        store.insert("a".into(), "10".into()).await?;
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("10"));

        assert!(store.remove(&"b".into()).await?);
        assert!(!store.remove(&"b".into()).await?);

        let reloaded = JsonMapStore::<String, String>::open(&tmp).await?;
        assert_eq!(reloaded.values().await, vec!["10".to_string()]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let tmp = temp_path();
        tokio::fs::write(&tmp, b"{not json").await.unwrap();
        let res = JsonMapStore::<String, String>::open(&tmp).await;
        assert!(matches!(res, Err(ServiceError::Store(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
    }
}
