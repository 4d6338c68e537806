use std::sync::Arc;

use chrono::Utc;

use crate::{
    db::Storage,
    error::{AppError, AppResult},
    models::{FilterCriteria, HistoryEntry, Recipe},
};

/// Fixed storage key for the persisted log
const HISTORY_KEY: &str = "recipe-history";

/// Retention window; insertion evicts the oldest entry once at capacity
pub const HISTORY_CAPACITY: usize = 20;

/// Bounded, persisted log of user votes, newest first
///
/// Loaded once at construction and persisted after every mutation. The
/// read-modify-persist sequence is not reentrant-safe against concurrent
/// writers; a deployment must ensure a single logical writer per storage
/// backing (one active session).
pub struct HistoryStore {
    storage: Arc<dyn Storage>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Reads the persisted log; absent or unreadable backing yields an
    /// empty log rather than an error
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let entries = match storage.get(HISTORY_KEY).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "Persisted history unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "History storage unavailable, starting empty");
                Vec::new()
            }
        };

        Self { storage, entries }
    }

    /// Prepends a vote, truncates to capacity, persists, and returns the
    /// updated log
    pub async fn record(
        &mut self,
        recipe: &Recipe,
        liked: bool,
        criteria: &FilterCriteria,
    ) -> AppResult<&[HistoryEntry]> {
        let entry = HistoryEntry {
            recipe: recipe.clone(),
            saved_at: Utc::now(),
            liked,
            criteria: criteria.clone(),
        };

        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist().await?;

        tracing::debug!(recipe_id = %recipe.id, liked, entries = self.entries.len(), "Vote recorded");

        Ok(&self.entries)
    }

    /// Empties the log and removes the persisted backing
    pub async fn clear(&mut self) -> AppResult<()> {
        self.entries.clear();
        self.storage.remove(HISTORY_KEY).await
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    async fn persist(&self) -> AppResult<()> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| AppError::Internal(format!("History serialization error: {}", e)))?;
        self.storage.set(HISTORY_KEY, &json).await
    }
}
