use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use quicksum::core::config::AppConfig;
use quicksum::features::Summarizer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    quicksum::setup_logging();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let summarizer =
        Arc::new(Summarizer::from_config(&config).context("Failed to initialize summarizer")?);
    let app = quicksum::api::router(summarizer);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("QuickSum backend running on port {}", config.port);
    info!("Health check: http://localhost:{}/health", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("QuickSum backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
