//! Hugging Face feature-extraction client

use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::EmbeddingConfig,
    error::{EmbeddingError, Result},
    types::{EmbeddingVector, FeatureExtractionRequest, FeatureExtractionResponse},
};

/// Batch embedding client
///
/// One request embeds the whole batch, so results are either complete and
/// index-aligned with the input or the call fails.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    client: Client,
    config: EmbeddingConfig,
}

impl EmbeddingClient {
    /// Create a new embedding client
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| EmbeddingError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Embed a batch of texts, one vector per text in input order
    ///
    /// The request is abandoned as soon as `cancel` fires.
    #[instrument(skip(self, texts, cancel), fields(count = texts.len(), model = %self.config.model))]
    pub async fn embed_batch(
        &self,
        texts: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<EmbeddingVector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Embedding request cancelled");
                Err(EmbeddingError::Cancelled)
            }
            result = self.request_embeddings(texts) => result,
        }
    }

    /// Embed a single text
    pub async fn embed_text(&self, text: &str) -> Result<EmbeddingVector> {
        let mut vectors = self
            .embed_batch(&[text.to_string()], &CancellationToken::new())
            .await?;
        vectors.pop().ok_or(EmbeddingError::CountMismatch {
            expected: 1,
            actual: 0,
        })
    }

    /// Low-level embedding request
    async fn request_embeddings(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        let total_chars: usize = texts.iter().map(|t| t.chars().count()).sum();
        debug!(
            "Requesting embeddings: {} texts, {} chars total",
            texts.len(),
            total_chars
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&FeatureExtractionRequest { inputs: texts })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let parsed: FeatureExtractionResponse =
            serde_json::from_str(&body).map_err(|e| EmbeddingError::Decode(e.to_string()))?;
        let embeddings = parsed.into_vectors()?;

        self.validate(texts.len(), &embeddings)?;

        info!(
            "Generated embeddings: count={}, dimension={}, model={}",
            embeddings.len(),
            embeddings.first().map(Vec::len).unwrap_or(0),
            self.config.model
        );

        Ok(embeddings)
    }

    /// Check the response is complete and well-formed
    fn validate(&self, expected_count: usize, embeddings: &[EmbeddingVector]) -> Result<()> {
        if embeddings.len() != expected_count {
            return Err(EmbeddingError::CountMismatch {
                expected: expected_count,
                actual: embeddings.len(),
            });
        }

        let expected_dimension = self
            .config
            .dimension
            .unwrap_or_else(|| embeddings.first().map(Vec::len).unwrap_or(0));

        for (index, embedding) in embeddings.iter().enumerate() {
            if embedding.is_empty() {
                return Err(EmbeddingError::EmptyEmbedding { index });
            }

            if embedding.len() != expected_dimension {
                return Err(EmbeddingError::InvalidDimension {
                    expected: expected_dimension,
                    actual: embedding.len(),
                });
            }

            if embedding.iter().any(|v| !v.is_finite()) {
                return Err(EmbeddingError::NonFinite { index });
            }
        }

        Ok(())
    }

    fn transport_error(&self, error: reqwest::Error) -> EmbeddingError {
        if error.is_timeout() {
            EmbeddingError::Timeout {
                secs: self.config.timeout_secs,
            }
        } else {
            EmbeddingError::RequestFailed(error.to_string())
        }
    }

    /// Get the embedding model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the expected embedding dimension, if configured
    pub fn dimension(&self) -> Option<usize> {
        self.config.dimension
    }
}
