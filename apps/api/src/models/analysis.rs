use serde::{Deserialize, Serialize};

/// Resume name shown on the synthetic result of an aborted request.
pub const FAILURE_RESUME_NAME: &str = "Error";

/// Aggregated similarity of one resume against the job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    pub resume_name: String,
    pub score: u32, // 1 – 100
}

/// Per-resume outcome returned to callers of `analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysisResult {
    pub resume_name: String,
    pub score: u32,
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Set only on the synthetic result that replaces the list when a request aborts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResumeAnalysisResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            resume_name: FAILURE_RESUME_NAME.to_string(),
            score: 0,
            selected: false,
            email: None,
            error: Some(message.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
