use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::SummarizeError;

/// The kind of content a summary was produced from. Serialized as the wire
/// value of `contentType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Youtube,
    Webpage,
    Text,
}

impl ContentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Webpage => "webpage",
            Self::Text => "text",
        }
    }

    /// Section label placed above the content in the generation prompt.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Youtube => "YouTube Video Transcript",
            Self::Webpage => "Web Page Content",
            Self::Text => "Text Content",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "youtube" => Some(Self::Youtube),
            "webpage" => Some(Self::Webpage),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content-bearing summarization request. Exactly one payload per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryRequest {
    Video { url: String },
    Page { url: Option<String>, content: String },
    Text { text: String },
}

impl SummaryRequest {
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Video { .. } => ContentKind::Youtube,
            Self::Page { .. } => ContentKind::Webpage,
            Self::Text { .. } => ContentKind::Text,
        }
    }
}

/// Plain text ready to be placed into a prompt. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent(String);

impl NormalizedContent {
    /// # Errors
    ///
    /// Returns `EmptyContent` if `text` is blank.
    pub fn new(text: String) -> Result<Self, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyContent(
                "content is blank after normalization".to_string(),
            ));
        }
        Ok(Self(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, as reported back to clients.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary_text: String,
    pub original_length: usize,
    pub content_kind: ContentKind,
    /// Video ID, page URL, or `None` for raw text.
    pub source_identifier: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_kind_round_trips_through_its_wire_name() {
        for kind in [ContentKind::Youtube, ContentKind::Webpage, ContentKind::Text] {
            assert_eq!(ContentKind::parse(kind.as_str()), Some(kind));
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.as_str().to_string())
            );
        }
        assert_eq!(ContentKind::parse("podcast"), None);
    }

    #[test]
    fn request_kind_matches_payload() {
        let video = SummaryRequest::Video {
            url: "https://youtu.be/dQw4w9WgXcQ".into(),
        };
        let page = SummaryRequest::Page {
            url: None,
            content: "<p>x</p>".into(),
        };
        let text = SummaryRequest::Text { text: "x".into() };
        assert_eq!(video.kind(), ContentKind::Youtube);
        assert_eq!(page.kind(), ContentKind::Webpage);
        assert_eq!(text.kind(), ContentKind::Text);
    }

    #[test]
    fn normalized_content_rejects_blank_text() {
        assert!(matches!(
            NormalizedContent::new(" \n\t ".to_string()),
            Err(SummarizeError::EmptyContent(_))
        ));
    }

    #[test]
    fn char_len_counts_characters_not_bytes() {
        let content = NormalizedContent::new("héllo".to_string()).unwrap();
        assert_eq!(content.char_len(), 5);
    }
}
