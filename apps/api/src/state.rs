use std::sync::Arc;

use crate::config::Config;
use crate::jobs::JobCatalog;
use crate::matching::analyzer::ResumeAnalyzer;
use crate::notification::NotificationClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub jobs: Arc<JobCatalog>,
    /// Owns the pluggable embedder and text extractor.
    pub analyzer: Arc<ResumeAnalyzer>,
    /// `None` when MAIL_SERVICE_URL is unset; the notify route then answers 503.
    pub notifier: Option<NotificationClient>,
}
