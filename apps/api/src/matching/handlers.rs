use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::UploadedResume;
use crate::models::analysis::ResumeAnalysisResult;
use crate::state::AppState;

const FILES_FIELD: &str = "files";
const JOB_ID_FIELD: &str = "jobId";
const UNKNOWN_FILE_NAME: &str = "Unknown";

/// POST /api/v1/analyze
///
/// Multipart form: one or more `files` parts and a single `jobId` part.
/// Structural failures come back as 200 with a single failure result.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<ResumeAnalysisResult>>, AppError> {
    let mut uploads = Vec::new();
    let mut job_id: Option<i64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some(FILES_FIELD) => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or(UNKNOWN_FILE_NAME)
                    .to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Could not read upload {file_name}: {e}"))
                })?;
                uploads.push(UploadedResume::new(file_name, content_type.as_deref(), bytes));
            }
            Some(JOB_ID_FIELD) => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read jobId: {e}")))?;
                let id = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| AppError::Validation(format!("Invalid jobId: {raw}")))?;
                job_id = Some(id);
            }
            _ => {}
        }
    }

    if uploads.is_empty() {
        return Err(AppError::Validation(
            "At least one PDF file is required.".to_string(),
        ));
    }
    let job_id = job_id.ok_or_else(|| AppError::Validation("jobId is required.".to_string()))?;

    info!("Analyze request: job {job_id}, {} files", uploads.len());
    let results = state.analyzer.analyze(job_id, uploads).await;
    Ok(Json(results))
}
