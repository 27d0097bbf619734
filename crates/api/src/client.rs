//! HTTP client for the career backend.
//!
//! The backend owns all AI work (resume parsing, tech-stack suggestion,
//! roadmap generation) and persists roadmaps with their progress; this
//! client is a thin JSON-over-HTTP binding to its routes. No call is
//! retried; every request carries a timeout so a stuck backend surfaces
//! as a user-visible failure instead of a hang.

use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use skillpath_core::{
    CalendarEvent, Roadmap, RoadmapId, RoadmapRecord, TechStackSelection, TechStackSuggestion,
    UserId,
};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the career backend API.
#[derive(Clone)]
pub struct BackendClient {
    /// HTTP client
    client: Client,

    /// Backend base URL, without trailing slash
    base_url: String,
}

/// Result of parsing an uploaded resume.
#[derive(Debug, Clone)]
pub struct ParsedResume {
    /// The structured profile document extracted from the file
    pub data: Value,

    /// Id of the stored resume row, when the backend persisted one
    pub candidate_id: Option<String>,
}

/// A freshly generated set of roadmaps.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedRoadmaps {
    /// Backend-assigned id of the stored record
    pub roadmap_id: RoadmapId,

    /// One roadmap per selected technology
    pub roadmaps: Vec<Roadmap>,
}

impl BackendClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            client: ClientBuilder::new()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a resume file for parsing. Returns the structured profile
    /// document the AI service extracted.
    pub async fn parse_resume(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        user_id: &UserId,
    ) -> Result<ParsedResume> {
        debug!("Uploading resume {} ({} bytes)", filename, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("user_id", user_id.to_string());

        let response = self
            .client
            .post(self.url("/api/resume/parse"))
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::transport)?;

        #[derive(Deserialize)]
        struct ParseResponse {
            #[serde(default)]
            data: Value,
            #[serde(default)]
            candidate_id: Option<String>,
        }

        let body: ParseResponse = decode(check(response).await?).await?;
        Ok(ParsedResume {
            data: body.data,
            candidate_id: body.candidate_id,
        })
    }

    /// Replace the stored resume document for a candidate.
    pub async fn update_resume(&self, candidate_id: &str, document: &Value) -> Result<()> {
        let response = self
            .client
            .put(self.url(&format!("/api/resume/{candidate_id}")))
            .json(document)
            .send()
            .await
            .map_err(ApiError::transport)?;

        check(response).await?;
        Ok(())
    }

    /// Ask for tech-stack suggestions matching free-text interests.
    pub async fn suggest_tech_stacks(
        &self,
        interests: &[String],
        user_id: &UserId,
        user_skills: &[String],
    ) -> Result<Vec<TechStackSuggestion>> {
        let payload = serde_json::json!({
            "interests": interests,
            "user_id": user_id,
            "user_skills": user_skills,
        });

        let response = self
            .client
            .post(self.url("/api/roadmap/suggest-techstacks"))
            .json(&payload)
            .send()
            .await
            .map_err(ApiError::transport)?;

        #[derive(Deserialize)]
        struct SuggestResponse {
            #[serde(default)]
            techstacks: Vec<TechStackSuggestion>,
        }

        let body: SuggestResponse = decode(check(response).await?).await?;
        Ok(body.techstacks)
    }

    /// Generate roadmaps for the selected technologies.
    pub async fn generate_roadmaps(
        &self,
        user_id: &UserId,
        selections: &[TechStackSelection],
        user_skills: &[String],
    ) -> Result<GeneratedRoadmaps> {
        let payload = serde_json::json!({
            "user_id": user_id,
            "selections": selections,
            "user_skills": user_skills,
        });

        let response = self
            .client
            .post(self.url("/api/roadmap/generate"))
            .json(&payload)
            .send()
            .await
            .map_err(ApiError::transport)?;

        decode(check(response).await?).await
    }

    /// Fetch the user's latest roadmap record, progress included.
    pub async fn user_roadmap(&self, user_id: &UserId) -> Result<Option<RoadmapRecord>> {
        let response = self
            .client
            .get(self.url(&format!("/api/roadmap/{user_id}")))
            .send()
            .await
            .map_err(ApiError::transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(decode(check(response).await?).await?))
    }

    /// Fetch the user's active roadmap record, if any.
    pub async fn active_roadmap(&self, user_id: &UserId) -> Result<Option<RoadmapRecord>> {
        let response = self
            .client
            .get(self.url(&format!("/api/roadmap/active/{user_id}")))
            .send()
            .await
            .map_err(ApiError::transport)?;

        #[derive(Deserialize)]
        struct ActiveResponse {
            #[serde(default)]
            active: bool,
            #[serde(default)]
            roadmap: Option<RoadmapRecord>,
        }

        let body: ActiveResponse = decode(check(response).await?).await?;
        Ok(if body.active { body.roadmap } else { None })
    }

    /// Persist one day-toggle.
    pub async fn update_progress(
        &self,
        roadmap_id: &RoadmapId,
        tech_stack: &str,
        day: u32,
        completed: bool,
    ) -> Result<()> {
        let payload = serde_json::json!({
            "tech_stack": tech_stack,
            "day": day,
            "completed": completed,
        });

        let response = self
            .client
            .patch(self.url(&format!("/api/roadmap/{roadmap_id}/progress")))
            .json(&payload)
            .send()
            .await
            .map_err(ApiError::transport)?;

        check(response).await?;
        debug!("Progress persisted: {} day {} -> {}", tech_stack, day, completed);
        Ok(())
    }

    /// Fetch calendar events for a month.
    pub async fn calendar_events(
        &self,
        user_id: &UserId,
        month: u32,
        year: i32,
    ) -> Result<Vec<CalendarEvent>> {
        let response = self
            .client
            .get(self.url(&format!("/api/roadmap/calendar/{user_id}")))
            .query(&[("month", month.to_string()), ("year", year.to_string())])
            .send()
            .await
            .map_err(ApiError::transport)?;

        #[derive(Deserialize)]
        struct CalendarResponse {
            #[serde(default)]
            events: Vec<CalendarEvent>,
        }

        let body: CalendarResponse = decode(check(response).await?).await?;
        Ok(body.events)
    }

    /// Delete a roadmap record.
    pub async fn delete_roadmap(&self, roadmap_id: &RoadmapId) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/roadmap/{roadmap_id}")))
            .send()
            .await
            .map_err(ApiError::transport)?;

        check(response).await?;
        Ok(())
    }
}

/// Turn a non-success status into an [`ApiError::Status`], extracting the
/// FastAPI-style `detail` message when the body carries one.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str().map(String::from)))
        .unwrap_or(body);

    warn!("Backend returned {}: {}", status, message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response.json().await.map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BackendClient::new("http://localhost:8000/");
        assert_eq!(
            client.url("/api/roadmap/generate"),
            "http://localhost:8000/api/roadmap/generate"
        );
    }

    #[test]
    fn test_generated_roadmaps_decodes_backend_shape() {
        let body = serde_json::json!({
            "roadmap_id": "rm-42",
            "roadmaps": [
                { "tech_stack": "Rust", "duration_days": 7, "skill_level": "beginner" }
            ]
        });
        let generated: GeneratedRoadmaps = serde_json::from_value(body).unwrap();
        assert_eq!(generated.roadmap_id.as_str(), "rm-42");
        assert_eq!(generated.roadmaps.len(), 1);
        assert_eq!(generated.roadmaps[0].tech_stack, "Rust");
    }
}
