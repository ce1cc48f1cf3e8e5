//! Error types for analysis runs

use plagiarism_embedding::EmbeddingError;
use thiserror::Error;

/// Message shown when too few samples have content
pub const VALIDATION_MESSAGE: &str = "Please provide at least 2 text samples to compare";
/// Message shown for any embedding or scoring failure
pub const SERVICE_MESSAGE: &str = "Failed to analyze texts. Please try again.";

/// Outcome of a failed analysis
///
/// `Display` is what the user sees. The underlying cause of a service failure
/// stays reachable through `source()` for logging.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Please provide at least 2 text samples to compare")]
    Validation { eligible: usize },

    #[error("Failed to analyze texts. Please try again.")]
    Service(#[source] EmbeddingError),

    #[error("Analysis cancelled")]
    Cancelled,
}

impl From<EmbeddingError> for AnalysisError {
    fn from(error: EmbeddingError) -> Self {
        if error.is_cancelled() {
            AnalysisError::Cancelled
        } else {
            AnalysisError::Service(error)
        }
    }
}
