//! Summarization pipeline

pub mod summarize;

pub use summarize::{Summarizer, accept_raw_text};
