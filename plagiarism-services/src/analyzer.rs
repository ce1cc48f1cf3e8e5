//! Similarity analysis service
//!
//! Runs the full pipeline for one request: filter the samples, embed the
//! eligible ones in a single batch, then rank every pair.

use plagiarism_core::{eligible_samples, SimilarityResult, TextSample, MIN_SAMPLES};
use plagiarism_embedding::{rank_pairs, EmbeddingClient, EmbeddingConfig, EmbeddingError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::error::AnalysisError;

/// Service that scores text samples against each other
#[derive(Debug, Clone)]
pub struct SimilarityAnalyzer {
    client: EmbeddingClient,
}

impl SimilarityAnalyzer {
    pub fn new(client: EmbeddingClient) -> Self {
        Self { client }
    }

    /// Create an analyzer with its own embedding client
    pub fn from_config(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        Ok(Self::new(EmbeddingClient::new(config)?))
    }

    /// Embedding model in use
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Analyze samples with no external cancellation
    pub async fn analyze(
        &self,
        samples: &[TextSample],
    ) -> Result<Vec<SimilarityResult>, AnalysisError> {
        self.analyze_with_cancel(samples, &CancellationToken::new())
            .await
    }

    /// Analyze samples, abandoning the embedding call when `cancel` fires
    ///
    /// Pair indices in the output refer to the samples that have content, in
    /// their original order. Either every pair is returned or none is.
    #[instrument(skip(self, samples, cancel), fields(submitted = samples.len()))]
    pub async fn analyze_with_cancel(
        &self,
        samples: &[TextSample],
        cancel: &CancellationToken,
    ) -> Result<Vec<SimilarityResult>, AnalysisError> {
        let eligible = eligible_samples(samples);

        if eligible.len() < MIN_SAMPLES {
            debug!(
                "Rejecting analysis: {} of {} samples have content",
                eligible.len(),
                samples.len()
            );
            return Err(AnalysisError::Validation {
                eligible: eligible.len(),
            });
        }

        let texts: Vec<String> = eligible.iter().map(|s| s.trimmed().to_string()).collect();
        let labels: Vec<&str> = eligible.iter().map(|s| s.label.as_str()).collect();

        let outcome = match self.client.embed_batch(&texts, cancel).await {
            Ok(embeddings) => rank_pairs(&embeddings, &labels),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(results) => {
                info!(
                    "Analysis complete: {} samples, {} pairs",
                    eligible.len(),
                    results.len()
                );
                Ok(results)
            }
            Err(e) => {
                if e.is_cancelled() {
                    info!("Analysis cancelled before completion");
                } else {
                    error!("Error analyzing similarity: {}", e);
                }
                Err(AnalysisError::from(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::io::Write;
    use std::time::{Duration, Instant};

    const MODEL_PATH: &str = "/sentence-transformers/all-MiniLM-L6-v2/pipeline/feature-extraction";

    fn analyzer_for(server: &Server) -> SimilarityAnalyzer {
        let config = EmbeddingConfig::new("test-key").with_base_url(&server.url());
        SimilarityAnalyzer::from_config(config).expect("Failed to create analyzer")
    }

    fn sample(id: &str, content: &str) -> TextSample {
        TextSample::new(id, format!("Text {}", id), content)
    }

    #[tokio::test]
    async fn test_duplicate_texts_rank_first() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", MODEL_PATH)
            .match_body(Matcher::Json(json!({
                "inputs": [
                    "the cat sat",
                    "the cat sat",
                    "completely unrelated topic about finance"
                ]
            })))
            .with_status(200)
            .with_body(json!([[0.8, 0.6, 0.0], [0.8, 0.6, 0.0], [0.1, 0.0, 0.99]]).to_string())
            .create_async()
            .await;

        let samples = vec![
            sample("1", "the cat sat"),
            sample("2", "the cat sat"),
            sample("3", "completely unrelated topic about finance"),
        ];
        let results = analyzer_for(&server).analyze(&samples).await.unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].pair, (0, 1));
        assert!((results[0].similarity - 1.0).abs() < 1e-6);
        assert_eq!(results[0].labels, ("Text 1".to_string(), "Text 2".to_string()));
        assert!(results[1].similarity < results[0].similarity);
        assert!(results[2].similarity <= results[1].similarity);
    }

    #[tokio::test]
    async fn test_empty_samples_are_filtered_and_trimmed() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", MODEL_PATH)
            .match_body(Matcher::Json(json!({"inputs": ["alpha", "gamma"]})))
            .with_status(200)
            .with_body(json!([[1.0, 0.0], [0.6, 0.8]]).to_string())
            .create_async()
            .await;

        let samples = vec![sample("1", "  alpha\n"), sample("2", "   "), sample("3", "gamma")];
        let results = analyzer_for(&server).analyze(&samples).await.unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 1);
        // Indices refer to the filtered list
        assert_eq!(results[0].pair, (0, 1));
        assert_eq!(results[0].labels, ("Text 1".to_string(), "Text 3".to_string()));
        assert!((results[0].similarity - 0.6).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_single_non_empty_sample_is_rejected_without_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let samples = vec![sample("1", "only one"), sample("2", "")];
        let result = analyzer_for(&server).analyze(&samples).await;

        assert!(matches!(result, Err(AnalysisError::Validation { eligible: 1 })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_service_failure_returns_no_results() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", MODEL_PATH)
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let samples = vec![sample("1", "one"), sample("2", "two"), sample("3", "three")];
        let result = analyzer_for(&server).analyze(&samples).await;

        match result {
            Err(AnalysisError::Service(EmbeddingError::Api { status, .. })) => {
                assert_eq!(status, 500)
            }
            other => panic!("Expected service failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_response_is_service_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", MODEL_PATH)
            .with_status(200)
            .with_body(json!([[0.1, 0.2], [0.3, 0.4]]).to_string())
            .create_async()
            .await;

        let samples = vec![sample("1", "one"), sample("2", "two"), sample("3", "three")];
        let result = analyzer_for(&server).analyze(&samples).await;

        assert!(matches!(
            result,
            Err(AnalysisError::Service(EmbeddingError::CountMismatch { .. }))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_analysis() {
        let server = Server::new_async().await;
        let cancel = CancellationToken::new();
        cancel.cancel();

        let samples = vec![sample("1", "one"), sample("2", "two")];
        let result = analyzer_for(&server)
            .analyze_with_cancel(&samples, &cancel)
            .await;

        assert!(matches!(result, Err(AnalysisError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_while_embedding_in_flight() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", MODEL_PATH)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(3));
                w.write_all(b"[[1.0, 0.0], [0.0, 1.0]]")
            })
            .create_async()
            .await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let samples = vec![sample("1", "one"), sample("2", "two")];
        let started = Instant::now();
        let result = analyzer_for(&server)
            .analyze_with_cancel(&samples, &cancel)
            .await;

        assert!(matches!(result, Err(AnalysisError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
