use std::sync::Arc;
use tracing::{info, warn};

use crate::ai::{GeminiClient, TextGenerator};
use crate::clients::{TranscriptSource, YoutubeTranscriptClient};
use crate::core::config::AppConfig;
use crate::core::models::{NormalizedContent, SummaryRequest, SummaryResult};
use crate::errors::SummarizeError;
use crate::prompt::build_prompt;
use crate::utils::{extract_video_id, normalize_page_content};

/// Stateless request adapter: normalize, prompt, dispatch, reshape.
///
/// Holds only its two collaborators, so one instance can serve any number of
/// concurrent requests.
pub struct Summarizer {
    transcripts: Arc<dyn TranscriptSource>,
    generator: Arc<dyn TextGenerator>,
}

impl Summarizer {
    #[must_use]
    pub fn new(transcripts: Arc<dyn TranscriptSource>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            transcripts,
            generator,
        }
    }

    /// Wires the YouTube transcript client and the Gemini client from config.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamFailure` if either HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizeError> {
        Ok(Self::new(
            Arc::new(YoutubeTranscriptClient::from_config(config)?),
            Arc::new(GeminiClient::from_config(config)?),
        ))
    }

    /// Resolves a video URL to its identifier and joined transcript text.
    ///
    /// # Errors
    ///
    /// `InvalidReference` for URLs without an identifier, `NoTranscript` when
    /// the captions are missing or blank, `NotFound` when the video is gone,
    /// `UpstreamFailure` for other fetch failures.
    pub async fn resolve_video_reference(
        &self,
        url: &str,
    ) -> Result<(String, NormalizedContent), SummarizeError> {
        let video_id = extract_video_id(url)?;
        let segments = self.transcripts.fetch_transcript(&video_id).await?;

        let transcript = segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if transcript.trim().is_empty() {
            return Err(SummarizeError::NoTranscript(format!(
                "no transcript available for video {video_id}"
            )));
        }

        Ok((video_id, NormalizedContent::new(transcript)?))
    }

    /// Sends `prompt` to the generation endpoint. One call, no retries.
    ///
    /// # Errors
    ///
    /// Whatever the generator reports.
    pub async fn dispatch(&self, prompt: &str) -> Result<String, SummarizeError> {
        self.generator.generate(prompt).await
    }

    /// Runs the whole pipeline for one request.
    ///
    /// # Errors
    ///
    /// Any classified [`SummarizeError`]. Normalization failures return before
    /// the generation endpoint is contacted.
    #[tracing::instrument(level = "info", skip_all, fields(kind = %request.kind()))]
    pub async fn summarize(&self, request: SummaryRequest) -> Result<SummaryResult, SummarizeError> {
        let kind = request.kind();

        let (content, source_identifier) = match request {
            SummaryRequest::Video { url } => {
                let (video_id, content) = self.resolve_video_reference(&url).await?;
                (content, Some(video_id))
            }
            SummaryRequest::Page { url, content } => (normalize_page_content(&content)?, url),
            SummaryRequest::Text { text } => (accept_raw_text(text)?, None),
        };

        let original_length = content.char_len();
        info!(original_length, "Content normalized");

        let prompt = build_prompt(content.as_str(), kind);
        let summary_text = self.dispatch(&prompt).await.inspect_err(|e| {
            warn!(error = %e, kind = %e.kind(), "Generation call failed");
        })?;

        info!(summary_chars = summary_text.chars().count(), "Summary generated");

        Ok(SummaryResult {
            summary_text,
            original_length,
            content_kind: kind,
            source_identifier,
        })
    }
}

/// Raw text passes through unchanged and untruncated.
///
/// # Errors
///
/// Returns `EmptyContent` if the text is blank after trimming.
pub fn accept_raw_text(text: String) -> Result<NormalizedContent, SummarizeError> {
    NormalizedContent::new(text)
}
