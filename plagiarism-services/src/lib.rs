//! Business logic services for the Plagiarism Detector
//!
//! This crate wires the embedding client and the similarity engine into the
//! user-facing `analyze` operation, and keeps the sample-editing session state.

pub mod analyzer;
pub mod error;
pub mod workbench;

pub use analyzer::SimilarityAnalyzer;
pub use error::AnalysisError;
pub use workbench::{AnalysisStatus, Workbench};
