//! Error types for embedding operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbeddingError>;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Embedding API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode embedding response: {0}")]
    Decode(String),

    #[error("Embedding count mismatch: expected {expected}, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Empty embedding returned for input {index}")]
    EmptyEmbedding { index: usize },

    #[error("Non-finite value in embedding for input {index}")]
    NonFinite { index: usize },

    #[error("Embedding request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EmbeddingError {
    /// Whether this error came from the caller aborting the request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EmbeddingError::Cancelled)
    }
}
