//! All LLM functionality

pub mod client;

// Re-export main types for convenience
pub use client::{GeminiClient, TextGenerator, extract_summary_text};
