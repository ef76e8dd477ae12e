//! YouTube caption fetching.
//!
//! The watch page embeds a `captionTracks` list in its player response. Each
//! track has a `baseUrl` serving timed-text XML, one `<text>` element per
//! segment.

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::AppConfig;
use crate::errors::SummarizeError;
use crate::utils::links::watch_page_url;

const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";
const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";
const DEFAULT_LANGUAGE: &str = "en";

/// One timed caption segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Source of video transcripts, in segment order.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// # Errors
    ///
    /// `NoTranscript` when the video has no captions, `NotFound` when the
    /// video itself is missing, `UpstreamFailure` for other transport failures.
    async fn fetch_transcript(&self, video_id: &str)
    -> Result<Vec<TranscriptSegment>, SummarizeError>;
}

#[derive(Debug, Clone, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: String,
}

/// Fetches transcripts straight from YouTube watch pages
pub struct YoutubeTranscriptClient {
    http: Client,
    base_url: String,
    language: String,
}

impl YoutubeTranscriptClient {
    /// # Errors
    ///
    /// Returns `UpstreamFailure` if the HTTP client cannot be built.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, SummarizeError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                SummarizeError::UpstreamFailure(format!(
                    "Failed to build transcript HTTP client: {e}"
                ))
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// # Errors
    ///
    /// See [`YoutubeTranscriptClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizeError> {
        Ok(Self::new(config.youtube_base_url.clone(), config.upstream_timeout)?
            .with_language(config.transcript_language.clone()))
    }

    /// Preferred caption language (matched as a prefix of the track's language code).
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    async fn get_text(&self, url: &str, what: &str) -> Result<String, SummarizeError> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SummarizeError::UpstreamFailure(format!("Failed to fetch {what}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SummarizeError::NotFound(format!("{what} returned 404")));
        }
        if !status.is_success() {
            return Err(SummarizeError::UpstreamFailure(format!(
                "{what} returned status {status}"
            )));
        }

        Ok(response.text().await?)
    }

    fn resolve_track_url(&self, track_url: &str) -> String {
        if track_url.starts_with('/') {
            format!("{}{}", self.base_url, track_url)
        } else {
            track_url.to_string()
        }
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptClient {
    async fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> Result<Vec<TranscriptSegment>, SummarizeError> {
        let page_url = watch_page_url(&self.base_url, video_id)?;
        info!(video_id = %video_id, "Fetching transcript");

        let html = self.get_text(page_url.as_str(), "video page").await?;
        let tracks = extract_caption_tracks(&html, video_id)?;
        let track = select_track(&tracks, &self.language).ok_or_else(|| {
            SummarizeError::NoTranscript(format!("no caption tracks for video {video_id}"))
        })?;
        debug!(language = %track.language_code, "Selected caption track");

        let xml = self
            .get_text(&self.resolve_track_url(&track.base_url), "caption track")
            .await?;
        let segments = parse_timed_text(&xml);
        if segments.is_empty() {
            warn!(video_id = %video_id, "Caption track contained no segments");
            return Err(SummarizeError::NoTranscript(format!(
                "empty transcript for video {video_id}"
            )));
        }

        info!(video_id = %video_id, segments = segments.len(), "Fetched transcript");
        Ok(segments)
    }
}

fn extract_caption_tracks(html: &str, video_id: &str) -> Result<Vec<CaptionTrack>, SummarizeError> {
    let Some(marker_pos) = html.find(CAPTION_TRACKS_MARKER) else {
        if html.contains(RECAPTCHA_MARKER) {
            return Err(SummarizeError::UpstreamFailure(
                "YouTube is rate limiting transcript requests".to_string(),
            ));
        }
        return Err(SummarizeError::NoTranscript(format!(
            "transcripts are disabled or unavailable for video {video_id}"
        )));
    };

    let remaining = &html[marker_pos + CAPTION_TRACKS_MARKER.len()..];
    let tracks = serde_json::Deserializer::from_str(remaining)
        .into_iter::<Vec<CaptionTrack>>()
        .next()
        .ok_or_else(|| {
            SummarizeError::MalformedResponse("empty captionTracks list".to_string())
        })??;
    Ok(tracks)
}

fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code.starts_with(language))
        .or_else(|| tracks.first())
}

/// Parses timed-text XML into segments, decoding HTML entities.
#[must_use]
pub fn parse_timed_text(xml: &str) -> Vec<TranscriptSegment> {
    static TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"(?s)<text start="([^"]*)"(?: dur="([^"]*)")?[^>]*>(.*?)</text>"#)
            .expect("timed text regex compiles")
    });

    TEXT_RE
        .captures_iter(xml)
        .filter_map(|caps| {
            let raw = caps.get(3)?.as_str();
            // Caption text arrives double-escaped (`&amp;#39;`).
            let text = decode_entities(&decode_entities(raw)).trim().to_string();
            let start = caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(0.0);
            let duration = caps.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0.0);
            Some(TranscriptSegment {
                text,
                start,
                duration,
            })
        })
        .collect()
}

/// Decodes the XML named entities and numeric character references.
#[must_use]
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let Some(semi) = after.find(';').filter(|&i| i <= 10) else {
            out.push('&');
            rest = &after[1..];
            continue;
        };

        let entity = &after[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
