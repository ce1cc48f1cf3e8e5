//! Core types for embeddings

use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, Result};

/// Embedding vector (384 dimensions for all-MiniLM-L6-v2)
pub type EmbeddingVector = Vec<f32>;

/// Feature-extraction request body
#[derive(Debug, Clone, Serialize)]
pub(crate) struct FeatureExtractionRequest<'a> {
    pub inputs: &'a [String],
}

/// Feature-extraction response
///
/// Sentence-transformer models return one pooled vector per input. Plain
/// encoder models return one vector per token instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum FeatureExtractionResponse {
    Pooled(Vec<Vec<f32>>),
    TokenLevel(Vec<Vec<Vec<f32>>>),
}

impl FeatureExtractionResponse {
    /// Collapse the response into one vector per input
    pub fn into_vectors(self) -> Result<Vec<EmbeddingVector>> {
        match self {
            FeatureExtractionResponse::Pooled(vectors) => Ok(vectors),
            FeatureExtractionResponse::TokenLevel(inputs) => inputs
                .into_iter()
                .enumerate()
                .map(|(index, tokens)| mean_pool(index, tokens))
                .collect(),
        }
    }
}

/// Average token vectors into a single sentence vector
fn mean_pool(index: usize, tokens: Vec<Vec<f32>>) -> Result<EmbeddingVector> {
    let dimension = match tokens.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(EmbeddingError::EmptyEmbedding { index }),
    };

    let mut sum = vec![0.0_f32; dimension];
    for token in &tokens {
        if token.len() != dimension {
            return Err(EmbeddingError::InvalidDimension {
                expected: dimension,
                actual: token.len(),
            });
        }
        for (acc, value) in sum.iter_mut().zip(token) {
            *acc += value;
        }
    }

    let count = tokens.len() as f32;
    Ok(sum.into_iter().map(|v| v / count).collect())
}
