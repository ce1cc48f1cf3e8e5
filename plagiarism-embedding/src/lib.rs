//! Embedding and Semantic Similarity for Plagiarism Detection
//!
//! This crate turns text samples into vector embeddings using a Hugging Face
//! feature-extraction model and scores every pair of samples by cosine
//! similarity.
//!
//! ## Features
//! - Batch embedding with request timeout and cancellation
//! - Strict validation of the service response (count, dimension, finiteness)
//! - Cosine similarity and ranked pairwise comparison

pub mod client;
pub mod config;
pub mod error;
pub mod similarity;
pub mod types;

pub use client::EmbeddingClient;
pub use config::EmbeddingConfig;
pub use error::{EmbeddingError, Result};
pub use similarity::{cosine_similarity, rank_pairs};
pub use types::EmbeddingVector;
