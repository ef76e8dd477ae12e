//! Command-line client for the QuickSum service.
//!
//! Plays the part of the browser popup: sends content to the service, prints
//! the summary, and keeps the last few summaries in a local store.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use quicksum::extension::backend::DEFAULT_SERVER_URL;
use quicksum::extension::{
    BackendClient, ClientStore, FileBackend, SummaryResponse, default_store_path,
};
use quicksum::utils::is_youtube_video_page;

/// quicksum - summarize videos, pages and text into bullet points
#[derive(Parser, Debug)]
#[command(name = "quicksum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the QuickSum service
    #[arg(long, global = true, env = "QUICKSUM_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Path of the local history/settings store (defaults to the per-user data directory)
    #[arg(long, global = true, env = "QUICKSUM_STORE", default_value_os_t = default_store_path())]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a YouTube video from its transcript
    Video {
        /// Video URL (watch, youtu.be or embed form)
        url: String,
    },

    /// Summarize a web page
    Page {
        /// Page URL
        url: String,

        /// Read the page HTML from a file instead of downloading it
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Summarize text given as an argument, a file, or stdin
    Text {
        text: Option<String>,

        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Summarize a URL, treating YouTube watch pages as videos when auto-detect is on
    Summarize { url: String },

    /// Show recent summaries, newest first
    History,

    /// Remove all stored summaries
    ClearHistory,

    /// Check that the service is up
    Health,

    /// Show or change settings
    Settings {
        #[arg(long)]
        auto_detect: Option<bool>,

        #[arg(long)]
        theme: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut store = ClientStore::load(FileBackend::new(&cli.store))
        .with_context(|| format!("Failed to load store {}", cli.store.display()))?;
    let backend = BackendClient::new(&cli.server)?;

    match cli.command {
        Commands::Video { url } => {
            let response = backend.summarize_video(&url).await?;
            finish(&mut store, &response)?;
        }
        Commands::Page { url, file } => {
            let html = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => fetch_page(&url).await?,
            };
            let response = backend.summarize_page(Some(&url), &html).await?;
            finish(&mut store, &response)?;
        }
        Commands::Text { text, file } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let response = backend.summarize_text(&text).await?;
            finish(&mut store, &response)?;
        }
        Commands::Summarize { url } => {
            let response = if store.settings().auto_detect_youtube && is_youtube_video_page(&url) {
                backend.summarize_video(&url).await?
            } else {
                let html = fetch_page(&url).await?;
                backend.summarize_page(Some(&url), &html).await?
            };
            finish(&mut store, &response)?;
        }
        Commands::History => {
            if store.history().is_empty() {
                println!("No summaries yet.");
            }
            for entry in store.history() {
                println!(
                    "[{}] {} {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.kind,
                    entry.source.as_deref().unwrap_or("(text)")
                );
                println!("{}\n", entry.summary);
            }
        }
        Commands::ClearHistory => {
            store.clear_history()?;
            println!("History cleared.");
        }
        Commands::Health => {
            let health = backend.health().await?;
            println!("{} ({})", health.status, health.timestamp);
        }
        Commands::Settings { auto_detect, theme } => {
            if auto_detect.is_some() || theme.is_some() {
                store.update_settings(|settings| {
                    if let Some(flag) = auto_detect {
                        settings.auto_detect_youtube = flag;
                    }
                    if let Some(theme) = theme {
                        settings.theme = theme;
                    }
                })?;
            }
            println!("{}", serde_json::to_string_pretty(store.settings())?);
        }
    }

    Ok(())
}

fn finish(store: &mut ClientStore<FileBackend>, response: &SummaryResponse) -> anyhow::Result<()> {
    println!("{}", response.summary);
    store.record_summary(response.to_history_entry())?;
    Ok(())
}

async fn fetch_page(url: &str) -> anyhow::Result<String> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to fetch {url}"))?;
    if !response.status().is_success() {
        bail!("Fetching {url} returned status {}", response.status());
    }
    Ok(response.text().await?)
}
