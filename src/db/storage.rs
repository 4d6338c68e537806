use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::AppResult;

/// Durable key-value capability backing the fetch cache and the history log
///
/// The core never touches a concrete store directly; callers inject an
/// implementation, which keeps every persistence-dependent code path
/// testable against [`MemoryStorage`].
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removes the value stored under `key`; removing an absent key is a no-op
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// In-memory storage for tests and ephemeral sessions
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("missing").await.unwrap(), None);

        storage.set("k", "v1").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some("v1".to_string()));

        storage.set("k", "v2").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some("v2".to_string()));

        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_storage_remove_absent_key_is_noop() {
        let storage = MemoryStorage::new();
        storage.remove("never-set").await.unwrap();
    }
}
