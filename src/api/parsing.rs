//! Request bodies accepted by the summarization endpoints.
//!
//! Every field is optional at the serde level so a missing field produces the
//! endpoint's own 400 message instead of a generic rejection.

use serde::Deserialize;

use crate::core::models::SummaryRequest;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeBody {
    pub video_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebpageBody {
    pub url: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TextBody {
    pub text: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl YoutubeBody {
    /// `None` when `videoUrl` is missing or empty.
    #[must_use]
    pub fn into_request(self) -> Option<SummaryRequest> {
        present(self.video_url).map(|url| SummaryRequest::Video { url })
    }
}

impl WebpageBody {
    /// `None` when `content` is missing or empty. An empty `url` is dropped.
    #[must_use]
    pub fn into_request(self) -> Option<SummaryRequest> {
        let url = present(self.url);
        present(self.content).map(|content| SummaryRequest::Page { url, content })
    }
}

impl TextBody {
    /// `None` when `text` is missing or empty. Blank text is left for the
    /// pipeline to reject.
    #[must_use]
    pub fn into_request(self) -> Option<SummaryRequest> {
        present(self.text).map(|text| SummaryRequest::Text { text })
    }
}
