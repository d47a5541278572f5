//! Column matching: deciding which columns of two tables represent the
//! same attribute.
//!
//! Two interchangeable strategies exist. Exact-name matching intersects
//! header sets; similarity scoring ranks every cross-table column pair by
//! a pluggable scorer. Matchers only *propose* correspondences — fusion
//! acts on the caller-confirmed selection, never on raw proposals.

mod exact;
mod scored;

pub use exact::ExactNameMatcher;
pub use scored::{ColumnScorer, ColumnView, NameValueScorer, ScoredMatcher, ScorerWeights};

use serde::{Deserialize, Serialize};

/// A pair of columns believed to represent the same attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCorrespondence {
    /// Column name in the first table.
    pub column_a: String,
    /// Column name in the second table.
    pub column_b: String,
    /// Confidence score in [0, 1], when produced by a scoring matcher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl ColumnCorrespondence {
    /// Create an unscored correspondence.
    pub fn new(column_a: impl Into<String>, column_b: impl Into<String>) -> Self {
        Self {
            column_a: column_a.into(),
            column_b: column_b.into(),
            score: None,
        }
    }

    /// Create a scored correspondence.
    pub fn scored(
        column_a: impl Into<String>,
        column_b: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            column_a: column_a.into(),
            column_b: column_b.into(),
            score: Some(score),
        }
    }
}

/// Result of a matching pass, tagged by the strategy that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Shared column names, in first-table order. The caller picks a
    /// subset as join keys.
    ExactName { candidates: Vec<String> },
    /// Scored candidate pairs above the threshold, best first. The caller
    /// edits the list before fusion.
    Scored { pairs: Vec<ColumnCorrespondence> },
}
