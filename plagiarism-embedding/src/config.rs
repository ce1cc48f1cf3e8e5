//! Embedding service configuration

use std::{env, fmt, time::Duration};

use plagiarism_core::{DetectorError, DetectorResult};

pub const DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the embedding client
#[derive(Clone)]
pub struct EmbeddingConfig {
    /// Hugging Face API token
    pub api_key: String,
    /// Feature-extraction model id
    pub model: String,
    /// Root of the model endpoints (without trailing slash)
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Expected vector length, checked on every response when set
    pub dimension: Option<usize>,
}

impl EmbeddingConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            dimension: None,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load configuration from environment variables
    ///
    /// Expects:
    /// - HUGGINGFACE_API_KEY: API token (required)
    /// - EMBEDDING_MODEL, EMBEDDING_BASE_URL, EMBEDDING_TIMEOUT_SECS,
    ///   EMBEDDING_DIMENSION: optional overrides
    pub fn from_env() -> DetectorResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> DetectorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("HUGGINGFACE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DetectorError::config("HUGGINGFACE_API_KEY is not set"))?;

        let mut config = Self::new(api_key.trim());

        if let Some(model) = lookup("EMBEDDING_MODEL").filter(|m| !m.trim().is_empty()) {
            config = config.with_model(model.trim());
        }

        if let Some(base_url) = lookup("EMBEDDING_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(base_url.trim());
        }

        if let Some(raw) = lookup("EMBEDDING_TIMEOUT_SECS") {
            let secs = parse_positive("EMBEDDING_TIMEOUT_SECS", &raw)?;
            config = config.with_timeout_secs(secs as u64);
        }

        if let Some(raw) = lookup("EMBEDDING_DIMENSION") {
            let dimension = parse_positive("EMBEDDING_DIMENSION", &raw)?;
            config = config.with_dimension(dimension);
        }

        Ok(config)
    }

    /// Feature-extraction endpoint for the configured model
    pub fn endpoint(&self) -> String {
        format!("{}/{}/pipeline/feature-extraction", self.base_url, self.model)
    }
}

fn parse_positive(field: &str, raw: &str) -> DetectorResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(DetectorError::config(format!(
            "{} must be a positive integer, got '{}'",
            field, raw
        ))),
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("dimension", &self.dimension)
            .finish()
    }
}
