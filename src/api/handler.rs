//! HTTP router - thin handlers that delegate to the summarization pipeline.
//!
//! Each handler:
//! - Parses its body (missing fields and invalid JSON become 400s)
//! - Runs one pass of the pipeline
//! - Maps the outcome to the uniform response contract

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use super::helpers::{self, ApiResponse};
use super::parsing::{TextBody, WebpageBody, YoutubeBody};
use crate::core::models::{ContentKind, SummaryRequest};
use crate::errors::ErrorKind;
use crate::features::Summarizer;

/// Builds the application router around a shared summarizer.
pub fn router(summarizer: Arc<Summarizer>) -> Router {
    Router::new()
        .route("/summarize-youtube", post(summarize_youtube))
        .route("/summarize-webpage", post(summarize_webpage))
        .route("/summarize-text", post(summarize_text))
        .route("/health", get(health))
        .layer(Extension(summarizer))
        .layer(CorsLayer::permissive())
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn summarize_youtube(
    Extension(summarizer): Extension<Arc<Summarizer>>,
    body: Result<Json<YoutubeBody>, JsonRejection>,
) -> ApiResponse {
    let request = body.ok().and_then(|Json(b)| b.into_request());
    run(&summarizer, ContentKind::Youtube, request).await
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn summarize_webpage(
    Extension(summarizer): Extension<Arc<Summarizer>>,
    body: Result<Json<WebpageBody>, JsonRejection>,
) -> ApiResponse {
    let request = body.ok().and_then(|Json(b)| b.into_request());
    run(&summarizer, ContentKind::Webpage, request).await
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn summarize_text(
    Extension(summarizer): Extension<Arc<Summarizer>>,
    body: Result<Json<TextBody>, JsonRejection>,
) -> ApiResponse {
    let request = body.ok().and_then(|Json(b)| b.into_request());
    run(&summarizer, ContentKind::Text, request).await
}

pub async fn health() -> ApiResponse {
    helpers::ok_json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn run(
    summarizer: &Summarizer,
    endpoint: ContentKind,
    request: Option<SummaryRequest>,
) -> ApiResponse {
    let Some(request) = request else {
        warn!(%endpoint, "Request missing required field");
        return helpers::err_response(
            ErrorKind::EmptyContent,
            helpers::required_message(endpoint),
        );
    };

    info!(%endpoint, "Summarization request received");

    match summarizer.summarize(request).await {
        Ok(result) => {
            info!(%endpoint, original_length = result.original_length, "Summarization succeeded");
            helpers::ok_json(helpers::summary_body(&result))
        }
        Err(e) if e.is_client_error() => {
            warn!(%endpoint, kind = %e.kind(), "Rejected request: {}", e);
            helpers::error_response(endpoint, &e)
        }
        Err(e) => {
            error!(%endpoint, kind = %e.kind(), "Error summarizing content: {}", e);
            helpers::error_response(endpoint, &e)
        }
    }
}
