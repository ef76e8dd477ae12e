use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a failed summarization, reported to clients next to the
/// human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidReference,
    NotFound,
    EmptyContent,
    MalformedResponse,
    UpstreamFailure,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidReference => "InvalidReference",
            Self::NotFound => "NotFound",
            Self::EmptyContent => "EmptyContent",
            Self::MalformedResponse => "MalformedResponse",
            Self::UpstreamFailure => "UpstreamFailure",
        }
    }

    /// Default HTTP status for this kind. `NotFound` keeps 404 only where the
    /// endpoint looks something up by reference; see `api::helpers::status_for`.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidReference | Self::EmptyContent => 400,
            Self::NotFound => 404,
            Self::MalformedResponse | Self::UpstreamFailure => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of the summarization pipeline. The payload is internal detail for
/// logs and is never sent to clients.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Invalid content reference: {0}")]
    InvalidReference(String),

    #[error("Resource not found upstream: {0}")]
    NotFound(String),

    /// The video exists but has no usable captions. Reported as `NotFound`.
    #[error("No transcript available: {0}")]
    NoTranscript(String),

    #[error("Content is empty after normalization: {0}")]
    EmptyContent(String),

    #[error("Unexpected response shape from upstream: {0}")]
    MalformedResponse(String),

    #[error("Upstream request failed: {0}")]
    UpstreamFailure(String),
}

impl SummarizeError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidReference(_) => ErrorKind::InvalidReference,
            Self::NotFound(_) | Self::NoTranscript(_) => ErrorKind::NotFound,
            Self::EmptyContent(_) => ErrorKind::EmptyContent,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::UpstreamFailure(_) => ErrorKind::UpstreamFailure,
        }
    }

    /// True for failures caused by the caller's input rather than a collaborator.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidReference(_) | Self::EmptyContent(_))
    }
}

/// Transport errors, including body reads that time out or are cut short.
/// A 404 status (from `error_for_status`) is `NotFound`.
impl From<reqwest::Error> for SummarizeError {
    fn from(error: reqwest::Error) -> Self {
        if error.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            SummarizeError::NotFound(error.to_string())
        } else {
            SummarizeError::UpstreamFailure(error.to_string())
        }
    }
}

impl From<serde_json::Error> for SummarizeError {
    fn from(error: serde_json::Error) -> Self {
        SummarizeError::MalformedResponse(error.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
