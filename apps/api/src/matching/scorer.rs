//! Similarity Scorer — aggregates chunk-level cosine similarity into one score per resume.
//!
//! Pure and deterministic: operates on the embeddings already stored on each
//! `Document`. Documents without an embedding take no part in scoring.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::matching::store::Document;
use crate::matching::vectors::cosine_similarity;
use crate::models::analysis::SimilarityResult;

/// Scores strictly above this mark a resume as selected.
pub const SELECTION_THRESHOLD: u32 = 40;
pub const MIN_SCORE: u32 = 1;
pub const MAX_SCORE: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores every resume found in `resume_docs` against the job description chunks.
///
/// Algorithm:
/// 1. Drop resume documents without a source label
/// 2. Group the rest by source label
/// 3. For each group, average cosine similarity over every (resume chunk, job chunk)
///    pair, skipping mismatched or non-finite pairs
/// 4. score = round(average × 100), clamped to [1, 100]
///
/// Groups with no embedded chunk are omitted rather than scored.
pub fn score_resumes(resume_docs: &[Document], job_docs: &[Document]) -> Vec<SimilarityResult> {
    if resume_docs.is_empty() || job_docs.is_empty() {
        warn!("Resume or job description document list is empty");
        return Vec::new();
    }

    let mut groups: BTreeMap<&str, Vec<&Document>> = BTreeMap::new();
    for doc in resume_docs {
        match doc.source_label() {
            Some(label) => groups.entry(label).or_default().push(doc),
            None => warn!("Document missing resume metadata: {}", doc.id),
        }
    }

    if groups.is_empty() {
        warn!("No resume documents with valid metadata found");
        return Vec::new();
    }

    let job_embeddings: Vec<&[f32]> = job_docs
        .iter()
        .filter_map(|d| d.embedding.as_deref())
        .collect();
    if job_embeddings.is_empty() {
        warn!("No valid job description embeddings");
        return Vec::new();
    }

    info!("Processing {} resume groups", groups.len());

    let mut results = Vec::with_capacity(groups.len());
    for (resume_name, docs) in groups {
        let resume_embeddings: Vec<&[f32]> =
            docs.iter().filter_map(|d| d.embedding.as_deref()).collect();
        if resume_embeddings.is_empty() {
            warn!("No valid embeddings for resume: {resume_name}");
            continue;
        }

        let average = average_similarity(resume_name, &resume_embeddings, &job_embeddings);
        let score = scale_score(average);
        info!("Computed score for {resume_name}: {score}");
        results.push(SimilarityResult {
            resume_name: resume_name.to_string(),
            score,
        });
    }

    results
}

/// Mean cosine similarity over the full cross product, or 0.0 when no pair is valid.
fn average_similarity(resume_name: &str, resume: &[&[f32]], job: &[&[f32]]) -> f64 {
    let mut total = 0.0_f64;
    let mut count = 0_usize;

    for r in resume {
        for j in job {
            match cosine_similarity(r, j) {
                Ok(sim) if sim.is_finite() => {
                    total += sim;
                    count += 1;
                }
                Ok(sim) => warn!("Invalid similarity score for resume {resume_name}: {sim}"),
                Err(e) => warn!("Invalid vectors for resume {resume_name}: {e}"),
            }
        }
    }

    if count > 0 {
        total / count as f64
    } else {
        0.0
    }
}

/// `round(average × 100)` clamped to `[1, 100]`. A non-match still reports 1.
pub fn scale_score(average: f64) -> u32 {
    if !average.is_finite() {
        return MIN_SCORE;
    }
    let scaled = (average * 100.0).round();
    scaled.clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u32
}

pub fn is_selected(score: u32) -> bool {
    score > SELECTION_THRESHOLD
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
