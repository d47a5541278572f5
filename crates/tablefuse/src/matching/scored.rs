//! Similarity-scoring column matcher with a pluggable scorer.

use std::collections::BTreeSet;

use crate::error::{FuseError, Result};
use crate::input::DataTable;
use crate::schema::{ColumnProfile, Profiler};

use super::ColumnCorrespondence;

/// A column as seen by a scorer: name, cell values, and profile.
pub struct ColumnView<'a> {
    /// Column name.
    pub name: &'a str,
    /// All cell values, including missing ones.
    pub values: Vec<&'a str>,
    /// Profile of the column's contents.
    pub profile: &'a ColumnProfile,
}

/// Scores how likely two columns represent the same attribute.
///
/// Implementations must be deterministic: the same pair of columns always
/// yields the same score, and scores stay within [0, 1].
pub trait ColumnScorer {
    /// Score a cross-table column pair.
    fn score(&self, a: &ColumnView<'_>, b: &ColumnView<'_>) -> f64;
}

/// Component weights for [`NameValueScorer`].
#[derive(Debug, Clone)]
pub struct ScorerWeights {
    /// Weight of name similarity.
    pub name: f64,
    /// Weight of value-set overlap.
    pub values: f64,
    /// Weight of inferred-type compatibility.
    pub types: f64,
}

impl Default for ScorerWeights {
    fn default() -> Self {
        Self {
            name: 0.5,
            values: 0.3,
            types: 0.2,
        }
    }
}

/// Default scorer: Jaro-Winkler name similarity blended with distinct-value
/// Jaccard overlap and inferred-type compatibility.
pub struct NameValueScorer {
    weights: ScorerWeights,
}

impl NameValueScorer {
    /// Create a scorer with default weights.
    pub fn new() -> Self {
        Self {
            weights: ScorerWeights::default(),
        }
    }

    /// Create a scorer with custom component weights.
    pub fn with_weights(weights: ScorerWeights) -> Self {
        Self { weights }
    }

    fn name_similarity(a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(&a.to_lowercase(), &b.to_lowercase())
    }

    fn value_overlap(a: &ColumnView<'_>, b: &ColumnView<'_>) -> f64 {
        let set_a: BTreeSet<&str> = a
            .values
            .iter()
            .filter(|v| !DataTable::is_null_value(v))
            .copied()
            .collect();
        let set_b: BTreeSet<&str> = b
            .values
            .iter()
            .filter(|v| !DataTable::is_null_value(v))
            .copied()
            .collect();

        let union = set_a.union(&set_b).count();
        if union == 0 {
            return 0.0;
        }
        set_a.intersection(&set_b).count() as f64 / union as f64
    }

    fn type_compatibility(a: &ColumnProfile, b: &ColumnProfile) -> f64 {
        if a.inferred_type == b.inferred_type {
            1.0
        } else if a.inferred_type.is_numeric() && b.inferred_type.is_numeric() {
            0.8
        } else {
            0.0
        }
    }
}

impl Default for NameValueScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnScorer for NameValueScorer {
    fn score(&self, a: &ColumnView<'_>, b: &ColumnView<'_>) -> f64 {
        let total = self.weights.name + self.weights.values + self.weights.types;
        if total <= 0.0 {
            return 0.0;
        }

        let weighted = Self::name_similarity(a.name, b.name) * self.weights.name
            + Self::value_overlap(a, b) * self.weights.values
            + Self::type_compatibility(a.profile, b.profile) * self.weights.types;

        (weighted / total).clamp(0.0, 1.0)
    }
}

/// Scores every cross-table column pair and retains those above a
/// threshold.
pub struct ScoredMatcher<S = NameValueScorer> {
    scorer: S,
    threshold: f64,
}

impl ScoredMatcher<NameValueScorer> {
    /// Create a matcher with the default scorer.
    pub fn new(threshold: f64) -> Self {
        Self {
            scorer: NameValueScorer::new(),
            threshold,
        }
    }
}

impl<S: ColumnScorer> ScoredMatcher<S> {
    /// Create a matcher with a custom scorer.
    pub fn with_scorer(scorer: S, threshold: f64) -> Self {
        Self { scorer, threshold }
    }

    /// Score all pairs and return those with score strictly above the
    /// threshold, best first (name tie-breaks keep the order stable).
    ///
    /// An empty result is not an error: row-stitch fusion accepts an empty
    /// correspondence list and carries every column through unmatched.
    pub fn candidates(
        &self,
        a: &DataTable,
        b: &DataTable,
    ) -> Result<Vec<ColumnCorrespondence>> {
        if a.is_empty() {
            return Err(FuseError::EmptyInput(
                "first table has no rows".to_string(),
            ));
        }
        if b.is_empty() {
            return Err(FuseError::EmptyInput(
                "second table has no rows".to_string(),
            ));
        }

        let profiles_a = Profiler::profile_table(a);
        let profiles_b = Profiler::profile_table(b);

        let mut pairs = Vec::new();
        for (ia, name_a) in a.headers.iter().enumerate() {
            let view_a = ColumnView {
                name: name_a,
                values: a.column_values(ia).collect(),
                profile: &profiles_a[ia],
            };
            for (ib, name_b) in b.headers.iter().enumerate() {
                let view_b = ColumnView {
                    name: name_b,
                    values: b.column_values(ib).collect(),
                    profile: &profiles_b[ib],
                };
                let score = self.scorer.score(&view_a, &view_b);
                if score > self.threshold {
                    pairs.push(ColumnCorrespondence::scored(name_a, name_b, score));
                }
            }
        }

        pairs.sort_by(|x, y| {
            y.score
                .partial_cmp(&x.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| x.column_a.cmp(&y.column_a))
                .then_with(|| x.column_b.cmp(&y.column_b))
        });

        Ok(pairs)
    }
}
