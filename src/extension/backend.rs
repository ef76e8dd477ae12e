//! Client for the summarization service's HTTP surface.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::history::HistoryEntry;
use crate::core::models::ContentKind;
use crate::errors::ErrorKind;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Generous ceiling: the server bounds each of its own upstream calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to reach summarization service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Summarization service returned {status}: {message}")]
    Api {
        status: u16,
        kind: Option<ErrorKind>,
        message: String,
    },
}

/// Success body of any `/summarize-*` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: String,
    pub content_type: ContentKind,
    pub video_id: Option<String>,
    pub url: Option<String>,
    pub transcript_length: Option<usize>,
    pub content_length: Option<usize>,
    pub text_length: Option<usize>,
}

impl SummaryResponse {
    /// Video ID or page URL the summary came from.
    #[must_use]
    pub fn source(&self) -> Option<String> {
        self.video_id.clone().or_else(|| self.url.clone())
    }

    #[must_use]
    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry::new(self.summary.clone(), self.content_type, self.source())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    kind: Option<ErrorKind>,
}

pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Errors
    ///
    /// Transport failures or a non-2xx answer from the service.
    pub async fn summarize_video(&self, video_url: &str) -> Result<SummaryResponse, ClientError> {
        self.post("/summarize-youtube", json!({ "videoUrl": video_url }))
            .await
    }

    /// # Errors
    ///
    /// Transport failures or a non-2xx answer from the service.
    pub async fn summarize_page(
        &self,
        url: Option<&str>,
        content: &str,
    ) -> Result<SummaryResponse, ClientError> {
        let mut body = json!({ "content": content });
        if let Some(url) = url {
            body["url"] = json!(url);
        }
        self.post("/summarize-webpage", body).await
    }

    /// # Errors
    ///
    /// Transport failures or a non-2xx answer from the service.
    pub async fn summarize_text(&self, text: &str) -> Result<SummaryResponse, ClientError> {
        self.post("/summarize-text", json!({ "text": text })).await
    }

    /// # Errors
    ///
    /// Transport failures or a non-2xx answer from the service.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(response.error_for_status()?.json().await?)
    }

    async fn post(&self, path: &str, body: Value) -> Result<SummaryResponse, ClientError> {
        debug!(path, "Calling summarization service");
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let (message, kind) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(parsed) => (parsed.error, parsed.kind),
            Err(_) => (text, None),
        };
        warn!(%status, ?kind, "Summarization service returned an error");
        Err(ClientError::Api {
            status: status.as_u16(),
            kind,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_prefers_video_id_then_url() {
        let response: SummaryResponse = serde_json::from_value(json!({
            "summary": "- a",
            "videoId": "dQw4w9WgXcQ",
            "transcriptLength": 10,
            "contentType": "youtube"
        }))
        .unwrap();
        assert_eq!(response.source().as_deref(), Some("dQw4w9WgXcQ"));

        let entry = response.to_history_entry();
        assert_eq!(entry.kind, ContentKind::Youtube);
        assert_eq!(entry.summary, "- a");
    }

    #[test]
    fn text_response_has_no_source() {
        let response: SummaryResponse = serde_json::from_value(json!({
            "summary": "- a",
            "textLength": 3,
            "contentType": "text"
        }))
        .unwrap();
        assert_eq!(response.source(), None);
        assert_eq!(response.text_length, Some(3));
    }
}
