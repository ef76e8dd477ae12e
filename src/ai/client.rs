//! Gemini `generateContent` client
//!
//! Encapsulates the single outbound call that turns a prompt into a summary.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::AppConfig;
use crate::errors::SummarizeError;

/// Header carrying the API credential
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can turn a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issues exactly one generation call for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError>;
}

/// Gemini API client for generating summaries
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns `UpstreamFailure` if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, SummarizeError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummarizeError::UpstreamFailure(format!("Failed to build Gemini HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Errors
    ///
    /// See [`GeminiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizeError> {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
            config.upstream_timeout,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Request body with the prompt as the sole message content.
    #[must_use]
    pub fn build_request_body(prompt: &str) -> Value {
        json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt }
                    ]
                }
            ]
        })
    }

    /// # Errors
    ///
    /// - `NotFound` when the endpoint answers 404
    /// - `UpstreamFailure` on transport errors, timeouts and other non-2xx statuses
    /// - `MalformedResponse` when the body is not JSON or has no text candidate
    pub async fn generate_summary(&self, prompt: &str) -> Result<String, SummarizeError> {
        #[cfg(feature = "debug-logs")]
        info!("Using Gemini prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Generating summary"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::build_request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                SummarizeError::UpstreamFailure(format!("Gemini API request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            warn!(%status, "Gemini API returned an error status");
            return Err(if status == StatusCode::NOT_FOUND {
                SummarizeError::NotFound(format!("Gemini API error (status {status}): {error_text}"))
            } else {
                SummarizeError::UpstreamFailure(format!(
                    "Gemini API error (status {status}): {error_text}"
                ))
            });
        }

        // Read and parse separately: a body that times out is not malformed.
        let body = response.bytes().await?;
        let response_json: Value = serde_json::from_slice(&body)?;

        let summary = extract_summary_text(&response_json)?;
        debug!(summary_chars = summary.chars().count(), "Received summary");
        Ok(summary)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        self.generate_summary(prompt).await
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a `generateContent` response.
///
/// # Errors
///
/// Returns `MalformedResponse` if any step of that path is absent.
pub fn extract_summary_text(response: &Value) -> Result<String, SummarizeError> {
    let candidates = response
        .get("candidates")
        .and_then(Value::as_array)
        .ok_or_else(|| SummarizeError::MalformedResponse("No candidates in response".to_string()))?;

    let first = candidates
        .first()
        .ok_or_else(|| SummarizeError::MalformedResponse("Empty candidates list".to_string()))?;

    first
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| {
            SummarizeError::MalformedResponse("First candidate has no text part".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::io::Write;

    fn client_for(server: &Server) -> GeminiClient {
        GeminiClient::new(
            "test-key".to_string(),
            "test-model".to_string(),
            server.url(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn request_body_wraps_prompt_in_single_part() {
        let body = GeminiClient::build_request_body("hello");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn extracts_first_text_part_of_first_candidate() {
        let response = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "- one\n- two" }, { "text": "ignored" } ] } },
                { "content": { "parts": [ { "text": "second candidate" } ] } }
            ]
        });
        assert_eq!(extract_summary_text(&response).unwrap(), "- one\n- two");
    }

    #[test]
    fn missing_shapes_are_malformed_responses() {
        for response in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [ {} ] }),
            json!({ "candidates": [ { "content": { "parts": [] } } ] }),
            json!({ "candidates": [ { "content": { "parts": [ { "text": 7 } ] } } ] }),
        ] {
            assert!(
                matches!(
                    extract_summary_text(&response),
                    Err(SummarizeError::MalformedResponse(_))
                ),
                "response: {response}"
            );
        }
    }

    #[test]
    fn endpoint_includes_model_and_trims_base_slash() {
        let client = GeminiClient::new(
            "k".to_string(),
            "gemini-2.0-flash".to_string(),
            "https://example.test/".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn sends_credential_header_and_returns_summary() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_header(API_KEY_HEADER, "test-key")
            .match_body(mockito::Matcher::PartialJson(json!({
                "contents": [ { "parts": [ { "text": "prompt" } ] } ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"- summary"}]}}]}"#)
            .create_async()
            .await;

        let summary = client_for(&server).generate("prompt").await.unwrap();
        assert_eq!(summary, "- summary");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn not_found_status_is_classified() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", mockito::Matcher::Any)
            .with_status(404)
            .with_body("model not found")
            .create_async()
            .await;

        let err = client_for(&server).generate("prompt").await.unwrap_err();
        assert!(matches!(err, SummarizeError::NotFound(_)));
    }

    #[tokio::test]
    async fn server_error_is_upstream_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server).generate("prompt").await.unwrap_err();
        assert!(matches!(err, SummarizeError::UpstreamFailure(_)));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = client_for(&server).generate("prompt").await.unwrap_err();
        assert!(matches!(err, SummarizeError::MalformedResponse(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn slow_body_times_out_as_upstream_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", mockito::Matcher::Any)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(3));
                w.write_all(br#"{"candidates":[{"content":{"parts":[{"text":"late"}]}}]}"#)
            })
            .create_async()
            .await;

        let client = GeminiClient::new(
            "k".to_string(),
            "m".to_string(),
            server.url(),
            Duration::from_secs(1),
        )
        .unwrap();
        let err = client.generate("p").await.unwrap_err();
        assert!(matches!(err, SummarizeError::UpstreamFailure(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_upstream_failure() {
        let client = GeminiClient::new(
            "k".to_string(),
            "m".to_string(),
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, SummarizeError::UpstreamFailure(_)));
    }
}
