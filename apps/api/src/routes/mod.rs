pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::notification;
use crate::state::AppState;

/// How many maximum-size PDFs one analyze request may carry.
const MAX_FILES_PER_REQUEST: usize = 20;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_mul(MAX_FILES_PER_REQUEST);

    Router::new()
        .route("/health", get(health::health_handler))
        // Job catalog
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        // Matching
        .route(
            "/api/v1/analyze",
            post(matching::handle_analyze).layer(DefaultBodyLimit::max(body_limit)),
        )
        // Notification
        .route("/api/v1/notify", post(notification::handle_notify))
        .with_state(state)
}
