//! Text samples submitted for comparison

use serde::{Deserialize, Serialize};

/// Minimum number of non-empty samples needed for an analysis
pub const MIN_SAMPLES: usize = 2;

/// A piece of text submitted by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSample {
    /// Caller-assigned identifier
    #[serde(default)]
    pub id: String,
    /// Raw text as entered
    pub content: String,
    /// Display name
    pub label: String,
}

impl TextSample {
    pub fn new(id: impl Into<String>, label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            label: label.into(),
        }
    }

    /// Content with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }

    /// Whether this sample can take part in an analysis
    pub fn is_eligible(&self) -> bool {
        !self.trimmed().is_empty()
    }

    /// Character count of the raw content (not bytes)
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Keep only eligible samples, preserving their order
///
/// Pair indices in similarity results refer to positions in this list.
pub fn eligible_samples(samples: &[TextSample]) -> Vec<&TextSample> {
    samples.iter().filter(|s| s.is_eligible()).collect()
}
