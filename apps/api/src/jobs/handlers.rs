use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::job::Job;
use crate::state::AppState;

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.jobs.jobs().to_vec())
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Job>, AppError> {
    state
        .jobs
        .get_job_by_id(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}
