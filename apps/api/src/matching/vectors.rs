//! Embedding vector helpers: dimension repair, L2 normalization and cosine similarity.

use thiserror::Error;
use tracing::debug;

/// Every stored embedding has exactly this many components.
pub const EMBEDDING_DIM: usize = 1024;

#[derive(Debug, Error, PartialEq)]
pub enum VectorError {
    #[error("vectors must have the same size: left={left}, right={right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Forces `vector` to `dim` components: longer vectors are truncated, shorter
/// ones are zero-padded. Lossy, but deterministic.
pub fn standardize(mut vector: Vec<f32>, dim: usize) -> Vec<f32> {
    if vector.len() != dim {
        debug!("Resizing embedding from {} to {dim} dimensions", vector.len());
        vector.resize(dim, 0.0);
    }
    vector
}

/// Scales `vector` to unit Euclidean length. The zero vector is returned unchanged.
pub fn l2_normalize(vector: Vec<f32>) -> Vec<f32> {
    let norm = vector
        .iter()
        .map(|v| f64::from(*v) * f64::from(*v))
        .sum::<f64>()
        .sqrt();
    if norm == 0.0 {
        return vector;
    }
    vector
        .into_iter()
        .map(|v| (f64::from(v) / norm) as f32)
        .collect()
}

/// `standardize` followed by `l2_normalize`.
pub fn prepare_embedding(vector: Vec<f32>, dim: usize) -> Vec<f32> {
    l2_normalize(standardize(vector, dim))
}

/// `dot(a, b) / (|a| * |b|)`, or 0.0 when either norm is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator > 0.0 {
        Ok(dot / denominator)
    } else {
        Ok(0.0)
    }
}
