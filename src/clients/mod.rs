//! Client modules for external API interactions

pub mod transcript_client;

pub use transcript_client::{TranscriptSegment, TranscriptSource, YoutubeTranscriptClient};
