//! Environment-driven settings.

use anyhow::{Context, Result};
use skillpath_core::UserId;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Settings read from `SKILLPATH_*` environment variables.
pub struct Settings {
    /// Career backend base URL
    pub backend_url: String,

    /// Managed store project URL, when configured
    pub supabase_url: Option<String>,

    /// Managed store API key, when configured
    pub supabase_key: Option<String>,

    /// Acting user
    pub user: UserId,
}

impl Settings {
    /// Read settings from the environment. Only the user id is required.
    pub fn from_env() -> Result<Self> {
        let backend_url = std::env::var("SKILLPATH_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let user = std::env::var("SKILLPATH_USER").context("SKILLPATH_USER is not set")?;

        Ok(Self {
            backend_url,
            supabase_url: std::env::var("SKILLPATH_SUPABASE_URL").ok(),
            supabase_key: std::env::var("SKILLPATH_SUPABASE_KEY").ok(),
            user: UserId::new(user),
        })
    }

    /// The managed-store credentials, or an error telling the user which
    /// variables to set.
    pub fn store_credentials(&self) -> Result<(&str, &str)> {
        match (&self.supabase_url, &self.supabase_key) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => anyhow::bail!(
                "profile storage is not configured; set SKILLPATH_SUPABASE_URL and SKILLPATH_SUPABASE_KEY"
            ),
        }
    }
}
