//! Risk levels for pairwise similarity scores

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DetectorError;

/// Similarity at or above this is High Risk
pub const HIGH_RISK_THRESHOLD: f64 = 0.8;
/// Similarity at or above this is Medium Risk
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.6;
/// Similarity at or above this is Low Risk
pub const LOW_RISK_THRESHOLD: f64 = 0.4;

/// Plagiarism risk derived from a similarity score
///
/// Variants are declared in ascending order so `Ord` follows severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a cosine similarity score
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if similarity >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else if similarity >= LOW_RISK_THRESHOLD {
            RiskLevel::Low
        } else {
            RiskLevel::None
        }
    }

    /// Get the full display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::None => "No Risk",
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    /// Whether a pair at this level should be reviewed by hand
    pub fn needs_review(&self) -> bool {
        *self >= RiskLevel::Medium
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = DetectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "no risk" => Ok(RiskLevel::None),
            "low" | "low risk" => Ok(RiskLevel::Low),
            "medium" | "medium risk" => Ok(RiskLevel::Medium),
            "high" | "high risk" => Ok(RiskLevel::High),
            _ => Err(DetectorError::parse(format!("Unknown risk level: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(RiskLevel::from_similarity(0.8), RiskLevel::High);
        assert_eq!(RiskLevel::from_similarity(0.6), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_similarity(0.4), RiskLevel::Low);
        assert_eq!(RiskLevel::from_similarity(0.39999), RiskLevel::None);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(RiskLevel::from_similarity(1.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_similarity(-1.0), RiskLevel::None);
        assert_eq!(RiskLevel::from_similarity(0.0), RiskLevel::None);
    }

    #[test]
    fn test_needs_review() {
        assert!(RiskLevel::High.needs_review());
        assert!(RiskLevel::Medium.needs_review());
        assert!(!RiskLevel::Low.needs_review());
        assert!(!RiskLevel::None.needs_review());
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(RiskLevel::Medium.to_string(), "Medium Risk");
        assert_eq!("high".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!("No Risk".parse::<RiskLevel>().unwrap(), RiskLevel::None);
        assert!("severe".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&RiskLevel::Low).unwrap();
        assert_eq!(json, "\"low\"");
    }
}
