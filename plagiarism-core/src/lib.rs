//! Core types for the Plagiarism Detector
//!
//! This crate defines the shared data structures used across the detector,
//! including text samples, pairwise similarity results and risk levels.

pub mod analysis;
pub mod error;
pub mod risk;
pub mod sample;

pub use analysis::{AnalysisSummary, ScoredPair, SimilarityResult};
pub use error::{DetectorError, DetectorResult};
pub use risk::RiskLevel;
pub use sample::{eligible_samples, TextSample, MIN_SAMPLES};
