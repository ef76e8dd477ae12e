//! QuickSum - summarizes YouTube videos, web pages and pasted text with Gemini.
//!
//! The service is a stateless request adapter:
//! 1. Normalize the input (transcript fetch, HTML cleanup, or raw text)
//! 2. Build a bullet-point summarization prompt
//! 3. Make one call to the Gemini `generateContent` endpoint
//! 4. Map the result, or a classified failure, onto a uniform JSON contract
//!
//! # Architecture
//!
//! - `api` exposes the axum router
//! - `features` holds the summarization pipeline
//! - `ai` and `clients` wrap the generation endpoint and the transcript source
//! - `extension` is the client side: history, settings and a service client
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use quicksum::core::config::AppConfig;
//! use quicksum::core::models::SummaryRequest;
//! use quicksum::features::Summarizer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     quicksum::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let summarizer = Arc::new(Summarizer::from_config(&config)?);
//!
//!     let result = summarizer
//!         .summarize(SummaryRequest::Text {
//!             text: "Rust is a systems programming language...".to_string(),
//!         })
//!         .await?;
//!     println!("{}", result.summary_text);
//!
//!     // Or serve the HTTP surface
//!     let app = quicksum::api::router(summarizer);
//!     let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod extension;
pub mod features;
pub mod prompt;
pub mod utils;

/// Configure structured JSON logging.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// quicksum::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
