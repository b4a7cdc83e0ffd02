/// Embedding Client — the single point of entry for remote embedding calls.
///
/// All chunk embeddings MUST go through an `Embedder`. The production implementation
/// is `EmbeddingClient`, which talks to an OpenAI-style `/v1/embeddings` endpoint
/// (NVIDIA NIM by default) one text at a time.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Texts shorter than this (after preprocessing) are never sent to the service.
pub const MIN_TEXT_LENGTH: usize = 10;
const INPUT_TYPE: &str = "query";
const ENCODING_FORMAT: &str = "float";
const TRUNCATE: &str = "NONE";
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("text too short for embedding ({len} < {min} characters)")]
    TooShortInput { len: usize, min: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("attempt timed out after {0:?}")]
    Timeout(Duration),

    #[error("embedding service returned an empty vector")]
    EmptyResult,

    #[error("embedding failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },
}

impl EmbeddingError {
    fn is_retryable(&self) -> bool {
        match self {
            EmbeddingError::Http(_) | EmbeddingError::Timeout(_) | EmbeddingError::EmptyResult => {
                true
            }
            EmbeddingError::Api { status, .. } => *status == 429 || *status >= 500,
            EmbeddingError::TooShortInput { .. } | EmbeddingError::Exhausted { .. } => false,
        }
    }
}

/// Produces one embedding vector per text. Implement this to swap the backend
/// without touching the analyzer.
///
/// Carried in `ResumeAnalyzer` as `Arc<dyn Embedder>`.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Retry behaviour for a single text. Every attempt is bounded by `attempt_timeout`;
/// a timed-out attempt is dropped, which cancels the in-flight request.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: Duration::from_secs(10),
            retry_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: [&'a str; 1],
    model: &'a str,
    input_type: &'a str,
    encoding_format: &'a str,
    truncate: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    embedding: Vec<f32>,
}

#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    policy: RetryPolicy,
}

impl EmbeddingClient {
    pub fn new(api_url: String, api_key: String, model: String) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            policy: RetryPolicy::default(),
        })
    }

    #[cfg(test)]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request_once(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbeddingRequest {
            input: [text],
            model: &self.model,
            input_type: INPUT_TYPE,
            encoding_format: ENCODING_FORMAT,
            truncate: TRUNCATE,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EmbeddingResponse = response.json().await?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .unwrap_or_default();

        if embedding.is_empty() {
            return Err(EmbeddingError::EmptyResult);
        }
        Ok(embedding)
    }

    async fn attempt(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match tokio::time::timeout(self.policy.attempt_timeout, self.request_once(text)).await {
            Ok(result) => result,
            Err(_) => Err(EmbeddingError::Timeout(self.policy.attempt_timeout)),
        }
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let processed = preprocess_text(text);
        let len = processed.chars().count();
        if len < MIN_TEXT_LENGTH {
            warn!(
                "Skipping text shorter than {MIN_TEXT_LENGTH} characters: {:?}",
                preview(&processed)
            );
            return Err(EmbeddingError::TooShortInput {
                len,
                min: MIN_TEXT_LENGTH,
            });
        }

        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 1..=max_attempts {
            match self.attempt(&processed).await {
                Ok(vector) => {
                    info!(
                        "Embedded text on attempt {attempt} ({} dims): {:?}",
                        vector.len(),
                        preview(&processed)
                    );
                    return Ok(vector);
                }
                Err(e) if e.is_retryable() => {
                    warn!("Embedding attempt {attempt}/{max_attempts} failed: {e}");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }

            if attempt < max_attempts {
                debug!("Retrying embedding after {:?}", self.policy.retry_delay);
                tokio::time::sleep(self.policy.retry_delay).await;
            }
        }

        Err(EmbeddingError::Exhausted {
            attempts: max_attempts,
            last: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}

/// Prepares text for the embedding service: newlines become spaces, the result is
/// trimmed, and anything outside `[a-zA-Z0-9\s]` becomes a space. Case is kept.
pub fn preprocess_text(text: &str) -> String {
    text.replace('\n', " ")
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_ascii_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// First few characters of `text`, for log lines.
pub fn preview(text: &str) -> &str {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
