//! In-memory resume store.
//!
//! Useful for tests and offline runs; rows live only as long as the
//! process.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use skillpath_core::{ResumeId, UserId};
use ulid::Ulid;

use crate::trait_::{Result, ResumeRow, ResumeStore, StoreError};

/// Resume store backed by a plain vector.
#[derive(Debug, Default)]
pub struct MemoryResumeStore {
    rows: Vec<ResumeRow>,
}

impl MemoryResumeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows across all users.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn insert(&mut self, user_id: &UserId, data: Value) -> Result<ResumeRow> {
        let row = ResumeRow {
            id: ResumeId::new(Ulid::new().to_string()),
            user_id: user_id.clone(),
            data,
            created_at: Utc::now(),
        };
        self.rows.push(row.clone());
        Ok(row)
    }

    async fn latest(&self, user_id: &UserId) -> Result<Option<ResumeRow>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| &row.user_id == user_id)
            .max_by_key(|row| row.created_at)
            .cloned())
    }

    async fn history(&self, user_id: &UserId) -> Result<Vec<ResumeRow>> {
        let mut rows: Vec<ResumeRow> = self
            .rows
            .iter()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn replace_latest(&mut self, user_id: &UserId, data: Value) -> Result<ResumeRow> {
        let row = self
            .rows
            .iter_mut()
            .filter(|row| &row.user_id == user_id)
            .max_by_key(|row| row.created_at)
            .ok_or_else(|| StoreError::NotFound(format!("no resume for user {user_id}")))?;
        row.data = data;
        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> UserId {
        UserId::new("u1")
    }

    #[tokio::test]
    async fn test_latest_returns_newest_row() {
        let mut store = MemoryResumeStore::new();
        let user = user();
        store.insert(&user, json!({"rev": 1})).await.unwrap();
        let second = store.insert(&user, json!({"rev": 2})).await.unwrap();

        let latest = store.latest(&user).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert_eq!(latest.data, json!({"rev": 2}));
    }

    #[tokio::test]
    async fn test_latest_is_none_for_unknown_user() {
        let store = MemoryResumeStore::new();
        assert!(store.latest(&user()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_scoped_to_user() {
        let mut store = MemoryResumeStore::new();
        let user = user();
        let other = UserId::new("u2");
        store.insert(&user, json!({"rev": 1})).await.unwrap();
        store.insert(&other, json!({"rev": 99})).await.unwrap();
        store.insert(&user, json!({"rev": 2})).await.unwrap();

        let history = store.history(&user).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].data, json!({"rev": 2}));
        assert_eq!(history[1].data, json!({"rev": 1}));
    }

    #[tokio::test]
    async fn test_replace_latest_edits_in_place() {
        let mut store = MemoryResumeStore::new();
        let user = user();
        store.insert(&user, json!({"rev": 1})).await.unwrap();
        store.insert(&user, json!({"rev": 2})).await.unwrap();

        store
            .replace_latest(&user, json!({"rev": "patched"}))
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
        let latest = store.latest(&user).await.unwrap().unwrap();
        assert_eq!(latest.data, json!({"rev": "patched"}));
    }

    #[tokio::test]
    async fn test_replace_latest_without_rows_is_not_found() {
        let mut store = MemoryResumeStore::new();
        let err = store.replace_latest(&user(), json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
