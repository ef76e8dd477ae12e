//! Normalization helpers shared by the summarization pipeline

pub mod html;
pub mod links;

pub use html::{MAX_PAGE_CONTENT_CHARS, normalize_page_content, strip_html};
pub use links::{extract_video_id, is_youtube_video_page};
