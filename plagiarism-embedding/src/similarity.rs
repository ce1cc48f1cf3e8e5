//! Cosine similarity calculations

use itertools::Itertools;
use ndarray::ArrayView1;
use plagiarism_core::SimilarityResult;
use tracing::debug;

use crate::error::{EmbeddingError, Result};
use crate::types::EmbeddingVector;

/// Calculate cosine similarity between two embeddings
///
/// Returns a value between -1.0 (opposite) and 1.0 (identical). When either
/// vector has zero magnitude the similarity is defined as 0.0.
///
/// Formula: cos(θ) = (A · B) / (||A|| ||B||)
/// where:
/// - A · B is the dot product
/// - ||A|| and ||B|| are the magnitudes (L2 norms)
///
/// # Panics
/// If the vectors differ in length. [`rank_pairs`] checks this up front.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "Embeddings must have same dimension (got {} and {})",
        a.len(),
        b.len()
    );

    // Accumulate in f64: f32 sums overflow or underflow on extreme magnitudes
    let a_wide = ArrayView1::from(a).mapv(f64::from);
    let b_wide = ArrayView1::from(b).mapv(f64::from);

    let dot_product = a_wide.dot(&b_wide);
    let norm_a = a_wide.dot(&a_wide).sqrt();
    let norm_b = b_wide.dot(&b_wide).sqrt();

    // Avoid division by zero
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot_product / (norm_a * norm_b);
    if !similarity.is_finite() {
        return 0.0;
    }

    similarity.clamp(-1.0, 1.0)
}

/// Score every pair of embeddings and rank them
///
/// # Arguments
/// * `embeddings` - One vector per sample, in sample order
/// * `labels` - Display label per sample, index-aligned with `embeddings`
///
/// # Returns
/// All N(N-1)/2 pairs sorted by similarity (highest first). Equal scores keep
/// their generation order, i.e. `(i, j)` ascending.
pub fn rank_pairs<S: AsRef<str>>(
    embeddings: &[EmbeddingVector],
    labels: &[S],
) -> Result<Vec<SimilarityResult>> {
    if embeddings.len() != labels.len() {
        return Err(EmbeddingError::CountMismatch {
            expected: labels.len(),
            actual: embeddings.len(),
        });
    }

    if let Some(first) = embeddings.first() {
        if let Some(bad) = embeddings.iter().find(|e| e.len() != first.len()) {
            return Err(EmbeddingError::InvalidDimension {
                expected: first.len(),
                actual: bad.len(),
            });
        }
    }

    debug!(
        "Ranking pairs: {} embeddings, {} pairs",
        embeddings.len(),
        embeddings.len() * embeddings.len().saturating_sub(1) / 2
    );

    let mut results: Vec<SimilarityResult> = (0..embeddings.len())
        .tuple_combinations()
        .map(|(i, j)| SimilarityResult {
            pair: (i, j),
            similarity: cosine_similarity(&embeddings[i], &embeddings[j]),
            labels: (labels[i].as_ref().to_string(), labels[j].as_ref().to_string()),
        })
        .collect();

    // Stable sort: ties stay in (i, j) order
    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(top) = results.first() {
        debug!(
            "Top pair: {:?} ({} vs {}), score={:.3}",
            top.pair, top.labels.0, top.labels.1, top.similarity
        );
    }

    Ok(results)
}
