//! Resume store abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use skillpath_core::{ResumeId, UserId};

/// Error type for resume store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while reading or writing resume rows.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP transport error
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("store error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No row matched the request
    #[error("not found: {0}")]
    NotFound(String),
}

/// One stored resume revision.
///
/// Revisions are append-only: editing a profile writes a new row, and the
/// newest row per user is the current profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRow {
    /// Row id
    pub id: ResumeId,

    /// Owner
    pub user_id: UserId,

    /// The structured profile document
    pub data: Value,

    /// When the row was written
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction for resume revisions.
///
/// This trait allows different row stores to be plugged in.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Append a new revision for the user. Returns the stored row.
    async fn insert(&mut self, user_id: &UserId, data: Value) -> Result<ResumeRow>;

    /// The newest revision for the user, if any.
    async fn latest(&self, user_id: &UserId) -> Result<Option<ResumeRow>>;

    /// All revisions for the user, newest first.
    async fn history(&self, user_id: &UserId) -> Result<Vec<ResumeRow>>;

    /// Overwrite the data of the newest revision in place.
    ///
    /// Fails with [`StoreError::NotFound`] when the user has no rows.
    async fn replace_latest(&mut self, user_id: &UserId, data: Value) -> Result<ResumeRow>;
}
