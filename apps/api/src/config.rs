use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_EMBEDDING_URL: &str = "https://integrate.api.nvidia.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "nvidia/nv-embedqa-e5-v5";
const DEFAULT_VECTOR_DIR: &str = "data/embeddings";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if the embedding API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub embedding_api_key: String,
    pub embedding_api_url: String,
    pub embedding_model: String,
    pub vector_dir: PathBuf,
    /// Optional JSON file with the job catalog. The built-in catalog is used when unset.
    pub jobs_file: Option<PathBuf>,
    /// Endpoint of the e-mail collaborator. Notification is disabled when unset.
    pub mail_service_url: Option<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            embedding_api_key: require_env("EMBEDDING_API_KEY")?,
            embedding_api_url: env_or("EMBEDDING_API_URL", DEFAULT_EMBEDDING_URL),
            embedding_model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            vector_dir: PathBuf::from(env_or("VECTOR_DIR", DEFAULT_VECTOR_DIR)),
            jobs_file: optional_env("JOBS_FILE").map(PathBuf::from),
            mail_service_url: optional_env("MAIL_SERVICE_URL"),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
