//! Sample editing session
//!
//! Holds the samples a user is working on together with the outcome of the
//! last analysis. All mutation goes through `&mut self`, so a session can only
//! ever run one analysis at a time.

use plagiarism_core::{
    eligible_samples, AnalysisSummary, SimilarityResult, TextSample, MIN_SAMPLES,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    analyzer::SimilarityAnalyzer,
    error::{AnalysisError, VALIDATION_MESSAGE},
};

/// Lifecycle of the current analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Editable set of samples plus the last successful results
#[derive(Debug, Clone)]
pub struct Workbench {
    samples: Vec<TextSample>,
    results: Vec<SimilarityResult>,
    status: AnalysisStatus,
    error: Option<String>,
    next_id: usize,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbench {
    /// Start with two empty samples
    pub fn new() -> Self {
        let mut workbench = Self {
            samples: Vec::new(),
            results: Vec::new(),
            status: AnalysisStatus::Idle,
            error: None,
            next_id: 1,
        };
        for _ in 0..MIN_SAMPLES {
            workbench.add_sample();
        }
        workbench
    }

    pub fn samples(&self) -> &[TextSample] {
        &self.samples
    }

    /// Results of the last successful analysis, highest similarity first
    pub fn results(&self) -> &[SimilarityResult] {
        &self.results
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary::from_results(&self.results)
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn is_analyzing(&self) -> bool {
        self.status == AnalysisStatus::InFlight
    }

    /// User-facing message from the last failed submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Append an empty sample and return its id
    pub fn add_sample(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.samples
            .push(TextSample::new(id.clone(), format!("Text {}", id), ""));
        id
    }

    /// Remove a sample unless that would leave fewer than two
    pub fn remove_sample(&mut self, id: &str) -> bool {
        if self.samples.len() <= MIN_SAMPLES {
            return false;
        }
        let before = self.samples.len();
        self.samples.retain(|s| s.id != id);
        self.samples.len() != before
    }

    pub fn update_content(&mut self, id: &str, content: impl Into<String>) -> bool {
        match self.sample_mut(id) {
            Some(sample) => {
                sample.content = content.into();
                true
            }
            None => false,
        }
    }

    pub fn update_label(&mut self, id: &str, label: impl Into<String>) -> bool {
        match self.sample_mut(id) {
            Some(sample) => {
                sample.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn char_count(&self, id: &str) -> Option<usize> {
        self.samples
            .iter()
            .find(|s| s.id == id)
            .map(TextSample::char_count)
    }

    /// Samples that will take part in the next analysis, in order
    pub fn eligible(&self) -> Vec<&TextSample> {
        eligible_samples(&self.samples)
    }

    pub async fn submit(&mut self, analyzer: &SimilarityAnalyzer) -> AnalysisStatus {
        self.submit_with_cancel(analyzer, &CancellationToken::new())
            .await
    }

    /// Run one analysis over the current samples
    ///
    /// Results are replaced only when the analysis succeeds. A submit that
    /// fails validation runs nothing and leaves the session `Idle`.
    pub async fn submit_with_cancel(
        &mut self,
        analyzer: &SimilarityAnalyzer,
        cancel: &CancellationToken,
    ) -> AnalysisStatus {
        if self.eligible().len() < MIN_SAMPLES {
            self.error = Some(VALIDATION_MESSAGE.to_string());
            self.status = AnalysisStatus::Idle;
            return self.status;
        }

        self.status = AnalysisStatus::InFlight;
        self.error = None;

        match analyzer.analyze_with_cancel(&self.samples, cancel).await {
            Ok(results) => {
                debug!("Workbench received {} results", results.len());
                self.results = results;
                self.status = AnalysisStatus::Succeeded;
            }
            Err(AnalysisError::Cancelled) => {
                self.status = AnalysisStatus::Idle;
            }
            Err(e) => {
                warn!("Workbench analysis failed: {}", e);
                self.error = Some(e.to_string());
                self.status = AnalysisStatus::Failed;
            }
        }

        self.status
    }

    fn sample_mut(&mut self, id: &str) -> Option<&mut TextSample> {
        self.samples.iter_mut().find(|s| s.id == id)
    }
}
