mod config;
mod embedding_client;
mod errors;
mod extraction;
mod jobs;
mod matching;
mod models;
mod notification;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding_client::EmbeddingClient;
use crate::extraction::PdfTextExtractor;
use crate::jobs::JobCatalog;
use crate::matching::analyzer::{MatchSettings, ResumeAnalyzer};
use crate::notification::NotificationClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Matcher v{}", env!("CARGO_PKG_VERSION"));

    // Job catalog
    let jobs = match &config.jobs_file {
        Some(path) => JobCatalog::from_file(path)?,
        None => JobCatalog::builtin(),
    };
    info!("Job catalog loaded with {} jobs", jobs.jobs().len());
    let jobs = Arc::new(jobs);

    // Initialize embedding client
    let embedder = EmbeddingClient::new(
        config.embedding_api_url.clone(),
        config.embedding_api_key.clone(),
        config.embedding_model.clone(),
    )
    .context("Failed to build embedding HTTP client")?;
    info!(
        "Embedding client initialized (model: {}, endpoint: {})",
        embedder.model(),
        config.embedding_api_url
    );

    let analyzer = ResumeAnalyzer::new(
        Arc::new(embedder),
        Arc::new(PdfTextExtractor),
        Arc::clone(&jobs),
        MatchSettings::new(config.vector_dir.clone(), config.max_upload_bytes),
    );
    info!("Vector files under {}", config.vector_dir.display());

    // Optional mail service
    let notifier = match &config.mail_service_url {
        Some(url) => {
            info!("Mail service configured at {url}");
            Some(
                NotificationClient::new(url.clone())
                    .context("Failed to build mail service HTTP client")?,
            )
        }
        None => {
            info!("MAIL_SERVICE_URL not set; notifications disabled");
            None
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        jobs,
        analyzer: Arc::new(analyzer),
        notifier,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
