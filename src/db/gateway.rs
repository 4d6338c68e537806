use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::storage::Storage;
use crate::error::AppResult;

/// Stable cache key derived from a logical catalog request
///
/// One key per distinct (operation, parameters) pair. Parameters are
/// lowercased so that differently-cased criteria share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Areas,
    Ingredients,
    RecipeFilter {
        area: Option<String>,
        ingredient: Option<String>,
    },
    RecipeDetail(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Areas => write!(f, "areas"),
            CacheKey::Ingredients => write!(f, "ingredients"),
            CacheKey::RecipeFilter { area, ingredient } => write!(
                f,
                "filter:{}:{}",
                area.as_deref().unwrap_or("any").to_lowercase(),
                ingredient.as_deref().unwrap_or("any").to_lowercase()
            ),
            CacheKey::RecipeDetail(id) => write!(f, "recipe:{}", id),
        }
    }
}

/// Resilient boundary around a single outbound read
///
/// Executes the read, persists the result under the request's key on
/// success, and falls back to the last persisted value when the read fails.
/// This is read-through, write-on-success caching with last-good fallback,
/// not a TTL cache: entries are never proactively expired.
#[derive(Clone)]
pub struct Gateway {
    storage: Arc<dyn Storage>,
}

impl Gateway {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Runs `operation` and returns its value, persisting it under `key`
    ///
    /// On failure, returns the prior persisted value for `key` if one exists
    /// and still decodes; otherwise the original failure propagates. Failed
    /// fetches never modify the cache, and no value is ever synthesized.
    pub async fn fetch_with_fallback<T, F, Fut>(&self, key: &CacheKey, operation: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let storage_key = key.to_string();

        match operation().await {
            Ok(value) => {
                match serde_json::to_string(&value) {
                    Ok(json) => {
                        // A failed persist must not fail the fetch
                        if let Err(e) = self.storage.set(&storage_key, &json).await {
                            tracing::warn!(key = %storage_key, error = %e, "Failed to persist fetched value");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(key = %storage_key, error = %e, "Cache serialization error");
                    }
                }
                Ok(value)
            }
            Err(fetch_err) => {
                tracing::warn!(key = %storage_key, error = %fetch_err, "Fetch failed, trying cached value");

                match self.storage.get(&storage_key).await {
                    Ok(Some(json)) => match serde_json::from_str(&json) {
                        Ok(value) => {
                            tracing::info!(key = %storage_key, "Serving stale cached value");
                            Ok(value)
                        }
                        Err(decode_err) => {
                            tracing::warn!(key = %storage_key, error = %decode_err, "Cached value unreadable");
                            Err(fetch_err)
                        }
                    },
                    Ok(None) => Err(fetch_err),
                    Err(storage_err) => {
                        tracing::warn!(key = %storage_key, error = %storage_err, "Cache read failed");
                        Err(fetch_err)
                    }
                }
            }
        }
    }
}
