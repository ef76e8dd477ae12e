//! Response builders shared by the API handlers.

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::core::models::{ContentKind, SummaryResult};
use crate::errors::{ErrorKind, SummarizeError};

pub type ApiResponse = (StatusCode, Json<Value>);

/// Returns a 200 OK response with the given JSON body.
#[must_use]
pub fn ok_json(body: Value) -> ApiResponse {
    (StatusCode::OK, Json(body))
}

/// Returns an error response carrying a short message and the failure kind.
#[must_use]
pub fn err_response(kind: ErrorKind, message: &str) -> ApiResponse {
    respond(kind.status_code(), kind, message)
}

fn respond(status: u16, kind: ErrorKind, message: &str) -> ApiResponse {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({ "error": message, "kind": kind.as_str() })),
    )
}

/// HTTP status for a failure on the given endpoint. Only the video endpoint
/// answers 404; elsewhere `NotFound` is an upstream problem and maps to 500.
#[must_use]
pub const fn status_for(endpoint: ContentKind, kind: ErrorKind) -> u16 {
    match (endpoint, kind) {
        (ContentKind::Youtube, _) | (_, ErrorKind::InvalidReference | ErrorKind::EmptyContent) => {
            kind.status_code()
        }
        _ => 500,
    }
}

/// Message shown when a required field is missing or empty.
#[must_use]
pub const fn required_message(endpoint: ContentKind) -> &'static str {
    match endpoint {
        ContentKind::Youtube => "Video URL is required",
        ContentKind::Webpage => "Content is required",
        ContentKind::Text => "Text content is required",
    }
}

/// Client-facing message for a pipeline failure on the given endpoint.
#[must_use]
pub const fn public_message(endpoint: ContentKind, error: &SummarizeError) -> &'static str {
    match (endpoint, error) {
        (ContentKind::Youtube, SummarizeError::InvalidReference(_)) => "Invalid YouTube URL",
        (ContentKind::Youtube, SummarizeError::NoTranscript(_)) => {
            "No transcript available for this video"
        }
        (ContentKind::Youtube, SummarizeError::NotFound(_)) => {
            "Video not found or transcript unavailable"
        }
        (_, SummarizeError::EmptyContent(_) | SummarizeError::InvalidReference(_)) => {
            required_message(endpoint)
        }
        (ContentKind::Youtube, _) => "Failed to summarize video",
        (ContentKind::Webpage, _) => "Failed to summarize webpage",
        (ContentKind::Text, _) => "Failed to summarize text",
    }
}

/// Maps a pipeline failure to its HTTP response.
#[must_use]
pub fn error_response(endpoint: ContentKind, error: &SummarizeError) -> ApiResponse {
    let kind = error.kind();
    respond(
        status_for(endpoint, kind),
        kind,
        public_message(endpoint, error),
    )
}

/// Shapes a successful result into the per-endpoint response body.
#[must_use]
pub fn summary_body(result: &SummaryResult) -> Value {
    let mut body = json!({
        "summary": result.summary_text,
        "contentType": result.content_kind.as_str(),
    });

    let length_field = match result.content_kind {
        ContentKind::Youtube => "transcriptLength",
        ContentKind::Webpage => "contentLength",
        ContentKind::Text => "textLength",
    };
    body[length_field] = json!(result.original_length);

    let source_field = match result.content_kind {
        ContentKind::Youtube => Some("videoId"),
        ContentKind::Webpage => Some("url"),
        ContentKind::Text => None,
    };
    if let (Some(field), Some(source)) = (source_field, &result.source_identifier) {
        body[field] = json!(source);
    }

    body
}
