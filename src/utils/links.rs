use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::errors::SummarizeError;

/// Length of a YouTube video identifier
pub const VIDEO_ID_LEN: usize = 11;

/// Extract the 11-character video identifier from a YouTube URL.
///
/// Supported shapes:
/// - `youtube.com/watch?v=<id>` (including `v` after other query params)
/// - `youtube.com/embed/<id>`, `youtube.com/v/<id>`, `youtube.com/e/<id>`
/// - `youtube.com/<section>/<anything>/<id>`
/// - `youtu.be/<id>`
///
/// # Errors
///
/// Returns `InvalidReference` when no identifier-shaped substring is found.
pub fn extract_video_id(url: &str) -> Result<String, SummarizeError> {
    static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
        )
        .expect("video id regex compiles")
    });

    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            SummarizeError::InvalidReference(format!("no video identifier found in {url:?}"))
        })
}

/// Whether `url` points at a YouTube watch page.
#[must_use]
pub fn is_youtube_video_page(url: &str) -> bool {
    url.contains("youtube.com/watch")
}

/// Builds the watch-page URL for `video_id` under `base_url`.
///
/// # Errors
///
/// Returns `InvalidReference` if `base_url` is not an absolute URL.
pub fn watch_page_url(base_url: &str, video_id: &str) -> Result<Url, SummarizeError> {
    let mut url = Url::parse(base_url)
        .and_then(|base| base.join("/watch"))
        .map_err(|e| SummarizeError::InvalidReference(format!("bad base url {base_url}: {e}")))?;
    url.query_pairs_mut().append_pair("v", video_id);
    Ok(url)
}
