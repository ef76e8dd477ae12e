//! Regex-based HTML cleanup for page content.
//!
//! This is not an HTML parser. It removes `<script>` and `<style>` blocks,
//! drops every remaining tag, and collapses whitespace.

use regex::Regex;
use std::sync::LazyLock;

use crate::core::models::NormalizedContent;
use crate::errors::SummarizeError;

/// Maximum number of characters of page content sent to the generation endpoint
pub const MAX_PAGE_CONTENT_CHARS: usize = 8000;

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("script regex compiles")
});

static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("style regex compiles")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag regex compiles"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex compiles"));

/// Strips markup and collapses whitespace without truncating.
#[must_use]
pub fn strip_html(raw: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(raw, "");
    let without_styles = STYLE_RE.replace_all(&without_scripts, "");
    let without_tags = TAG_RE.replace_all(&without_styles, " ");
    WHITESPACE_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Returns the first `max_chars` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Cleans raw page HTML into bounded prompt content.
///
/// # Errors
///
/// Returns `EmptyContent` when nothing but markup and whitespace remains.
pub fn normalize_page_content(raw_html: &str) -> Result<NormalizedContent, SummarizeError> {
    let cleaned = strip_html(raw_html);
    let bounded = truncate_chars(&cleaned, MAX_PAGE_CONTENT_CHARS);
    if bounded.is_empty() {
        return Err(SummarizeError::EmptyContent(
            "page content contained no text".to_string(),
        ));
    }
    NormalizedContent::new(bounded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_script_blocks_and_collapses_whitespace() {
        let content = normalize_page_content("<script>evil()</script><p>Hello   world</p>").unwrap();
        assert_eq!(content.as_str(), "Hello world");
    }

    #[test]
    fn removes_multiline_style_blocks_case_insensitively() {
        let html = "<STYLE type=\"text/css\">\nbody {\n  color: red;\n}\n</STYLE>\n<div>Kept</div>";
        assert_eq!(strip_html(html), "Kept");
    }

    #[test]
    fn script_removal_is_non_greedy() {
        let html = "<script>a()</script>middle<script>b()</script>end";
        assert_eq!(strip_html(html), "middleend");
    }

    #[test]
    fn tags_become_word_separators() {
        assert_eq!(strip_html("<li>one</li><li>two</li>"), "one two");
    }

    #[test]
    fn long_content_is_truncated_to_cap() {
        let content = normalize_page_content(&"a".repeat(10_000)).unwrap();
        assert_eq!(content.char_len(), MAX_PAGE_CONTENT_CHARS);
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 3), "ééé");
        assert_eq!(truncate_chars(&text, 50), text);
    }

    #[test]
    fn markup_only_input_is_empty_content() {
        let err = normalize_page_content("<script>x()</script>  <br/> <style>p{}</style>")
            .unwrap_err();
        assert!(matches!(err, SummarizeError::EmptyContent(_)));
    }
}
