//! Resume store backed by a PostgREST-style row API (Supabase).
//!
//! Rows live in a `resumes` table keyed by user, with `created_at` ordering
//! providing the revision history. Every request carries the project API
//! key both as `apikey` and as a bearer token, which is what Supabase's
//! REST gateway expects.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use serde_json::{json, Value};
use skillpath_core::UserId;
use std::time::Duration;
use tracing::debug;

use crate::trait_::{Result, ResumeRow, ResumeStore, StoreError};

const TABLE: &str = "resumes";
const TIMEOUT: Duration = Duration::from_secs(15);

/// Resume store speaking the PostgREST protocol.
pub struct RestResumeStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestResumeStore {
    /// Create a store for the given project URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: ClientBuilder::new()
                .timeout(TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn rows_for(&self, user_id: &UserId, limit: Option<u32>) -> Result<Vec<ResumeRow>> {
        let mut query = vec![
            ("select".to_string(), "*".to_string()),
            ("user_id".to_string(), format!("eq.{user_id}")),
            ("order".to_string(), "created_at.desc".to_string()),
        ];
        if let Some(limit) = limit {
            query.push(("limit".to_string(), limit.to_string()));
        }

        let response = self
            .authed(self.client.get(self.table_url()).query(&query))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

#[async_trait]
impl ResumeStore for RestResumeStore {
    async fn insert(&mut self, user_id: &UserId, data: Value) -> Result<ResumeRow> {
        debug!("Inserting resume revision for {}", user_id);

        let payload = json!({ "user_id": user_id, "data": data });
        let response = self
            .authed(
                self.client
                    .post(self.table_url())
                    .header("Prefer", "return=representation")
                    .json(&payload),
            )
            .send()
            .await?;

        // PostgREST returns the inserted rows as an array.
        let mut rows: Vec<ResumeRow> = check(response).await?.json().await?;
        rows.pop()
            .ok_or_else(|| StoreError::NotFound("insert returned no row".to_string()))
    }

    async fn latest(&self, user_id: &UserId) -> Result<Option<ResumeRow>> {
        let mut rows = self.rows_for(user_id, Some(1)).await?;
        Ok(rows.pop())
    }

    async fn history(&self, user_id: &UserId) -> Result<Vec<ResumeRow>> {
        self.rows_for(user_id, None).await
    }

    async fn replace_latest(&mut self, user_id: &UserId, data: Value) -> Result<ResumeRow> {
        let latest = self
            .latest(user_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("no resume for user {user_id}")))?;

        let response = self
            .authed(
                self.client
                    .patch(self.table_url())
                    .query(&[("id", format!("eq.{}", latest.id))])
                    .header("Prefer", "return=representation")
                    .json(&json!({ "data": data })),
            )
            .send()
            .await?;

        let mut rows: Vec<ResumeRow> = check(response).await?.json().await?;
        rows.pop()
            .ok_or_else(|| StoreError::NotFound(format!("row {} vanished", latest.id)))
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_has_no_double_slash() {
        let store = RestResumeStore::new("https://proj.supabase.co/", "key");
        assert_eq!(store.table_url(), "https://proj.supabase.co/rest/v1/resumes");
    }
}
