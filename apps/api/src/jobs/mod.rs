//! Job catalog — looks up the job description an analysis runs against.

pub mod handlers;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::job::Job;

#[derive(Debug, Clone)]
pub struct JobCatalog {
    jobs: Vec<Job>,
}

impl JobCatalog {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    /// The catalog shipped with the service.
    pub fn builtin() -> Self {
        Self::new(vec![Job {
            id: 1,
            title: "Developer".to_string(),
            description: "Software Coding as per Requirements and/or instruction by Team Lead\n\
                          Test source code to remove possible bugs from software module\n\
                          Help Team Lead for Effort estimations"
                .to_string(),
            requirements: "Experience in Web Application is preferred\n".to_string(),
        }])
    }

    /// Reads a JSON array of jobs.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read jobs file '{}'", path.display()))?;
        let jobs: Vec<Job> = serde_json::from_str(&content)
            .with_context(|| format!("Jobs file '{}' is not a JSON array of jobs", path.display()))?;
        info!("Loaded {} jobs from {}", jobs.len(), path.display());
        Ok(Self::new(jobs))
    }

    pub fn get_job_by_id(&self, id: i64) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }
}
