//! Error types for the detector

use thiserror::Error;

/// Detector-wide error type
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DetectorError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DetectorError::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        DetectorError::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        DetectorError::Config(msg.into())
    }
}

/// Result type alias for detector operations
pub type DetectorResult<T> = Result<T, DetectorError>;
