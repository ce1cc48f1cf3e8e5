//! Pairwise similarity results and summaries

use serde::{Deserialize, Serialize};

use crate::risk::RiskLevel;

/// Similarity between two eligible samples
///
/// `pair` indexes the filtered (non-empty) sample list, with `pair.0 < pair.1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub pair: (usize, usize),
    /// Cosine similarity in [-1, 1]
    pub similarity: f64,
    pub labels: (String, String),
}

impl SimilarityResult {
    pub fn risk(&self) -> RiskLevel {
        RiskLevel::from_similarity(self.similarity)
    }

    /// Score as a percentage with one decimal, e.g. "87.3%"
    pub fn percentage(&self) -> String {
        format!("{:.1}%", self.similarity * 100.0)
    }
}

/// A similarity result annotated for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair {
    #[serde(flatten)]
    pub result: SimilarityResult,
    pub risk: RiskLevel,
    pub risk_label: String,
    pub percentage: String,
    /// Potential plagiarism, manual review recommended
    pub needs_review: bool,
}

impl From<SimilarityResult> for ScoredPair {
    fn from(result: SimilarityResult) -> Self {
        let risk = result.risk();
        Self {
            risk,
            risk_label: risk.display_name().to_string(),
            percentage: result.percentage(),
            needs_review: risk.needs_review(),
            result,
        }
    }
}

/// Counts per risk bucket over a result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_pairs: usize,
    pub high_risk_pairs: usize,
    pub medium_risk_pairs: usize,
    pub low_risk_pairs: usize,
}

impl AnalysisSummary {
    pub fn from_results(results: &[SimilarityResult]) -> Self {
        results
            .iter()
            .fold(Self::default(), |mut summary, result| {
                summary.total_pairs += 1;
                match result.risk() {
                    RiskLevel::High => summary.high_risk_pairs += 1,
                    RiskLevel::Medium => summary.medium_risk_pairs += 1,
                    RiskLevel::Low => summary.low_risk_pairs += 1,
                    RiskLevel::None => {}
                }
                summary
            })
    }

    pub fn flagged_pairs(&self) -> usize {
        self.high_risk_pairs + self.medium_risk_pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(i: usize, j: usize, similarity: f64) -> SimilarityResult {
        SimilarityResult {
            pair: (i, j),
            similarity,
            labels: (format!("Text {}", i + 1), format!("Text {}", j + 1)),
        }
    }

    #[test]
    fn test_percentage_formatting() {
        assert_eq!(result(0, 1, 0.8734).percentage(), "87.3%");
        assert_eq!(result(0, 1, 1.0).percentage(), "100.0%");
        assert_eq!(result(0, 1, 0.0).percentage(), "0.0%");
    }

    #[test]
    fn test_scored_pair_flags_review() {
        let scored = ScoredPair::from(result(0, 1, 0.65));
        assert_eq!(scored.risk, RiskLevel::Medium);
        assert_eq!(scored.risk_label, "Medium Risk");
        assert!(scored.needs_review);

        let scored = ScoredPair::from(result(0, 2, 0.45));
        assert!(!scored.needs_review);
    }

    #[test]
    fn test_scored_pair_serializes_flat() {
        let json = serde_json::to_value(ScoredPair::from(result(0, 1, 0.9))).unwrap();
        assert_eq!(json["pair"], serde_json::json!([0, 1]));
        assert_eq!(json["labels"], serde_json::json!(["Text 1", "Text 2"]));
        assert_eq!(json["risk"], "high");
    }

    #[test]
    fn test_summary_buckets() {
        let results = vec![
            result(0, 1, 0.95),
            result(0, 2, 0.8),
            result(1, 2, 0.7),
            result(0, 3, 0.5),
            result(1, 3, 0.1),
            result(2, 3, 0.6),
        ];

        let summary = AnalysisSummary::from_results(&results);
        assert_eq!(summary.total_pairs, 6);
        assert_eq!(summary.high_risk_pairs, 2);
        assert_eq!(summary.medium_risk_pairs, 2);
        assert_eq!(summary.low_risk_pairs, 1);
        assert_eq!(summary.flagged_pairs(), 4);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(AnalysisSummary::from_results(&[]), AnalysisSummary::default());
    }
}
