//! Weighted-blend derivation over numeric column pairs.
//!
//! Purely additive: every blend appends one derived column to a copy of
//! the table and never touches existing columns.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{FuseError, Result};
use crate::fusion::{unique_name, DropOutcome};
use crate::input::DataTable;

/// A pair of columns to blend into one derived column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendGroup {
    /// Column names; exactly two are required for the group to apply.
    pub columns: Vec<String>,
    /// Weight of the first column; the second gets `1 - weight`.
    pub weight: f64,
}

impl BlendGroup {
    /// Create a two-column blend group.
    pub fn new(col1: impl Into<String>, col2: impl Into<String>, weight: f64) -> Self {
        Self {
            columns: vec![col1.into(), col2.into()],
            weight,
        }
    }
}

/// Non-fatal notice emitted while blending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendNotice {
    /// Zero-based index of the group the notice concerns.
    pub group: usize,
    /// Human-readable description.
    pub message: String,
}

/// Derives weighted-blend columns.
pub struct Blender;

impl Blender {
    /// Apply the blend groups to a copy of the table.
    ///
    /// Each group of exactly two existing columns appends a column
    /// `optimized_<col1>_<col2>` holding `col1 * w + col2 * (1 - w)` per
    /// row; rows where either operand is missing or non-numeric get a
    /// missing result. Groups that cannot apply (wrong column count,
    /// unknown column) are skipped with a notice. A weight outside [0, 1]
    /// is a configuration error.
    pub fn blend(
        table: &DataTable,
        groups: &[BlendGroup],
    ) -> Result<(DataTable, Vec<BlendNotice>)> {
        let mut result = table.clone();
        let mut notices = Vec::new();
        let mut taken: HashSet<String> = table.headers.iter().cloned().collect();

        for (idx, group) in groups.iter().enumerate() {
            if !(0.0..=1.0).contains(&group.weight) {
                return Err(FuseError::Config(format!(
                    "blend weight {} for group {} is outside [0, 1]",
                    group.weight,
                    idx + 1
                )));
            }

            if group.columns.len() != 2 {
                notices.push(BlendNotice {
                    group: idx,
                    message: format!(
                        "group {} names {} columns, expected exactly 2; skipped",
                        idx + 1,
                        group.columns.len()
                    ),
                });
                continue;
            }

            let (col1, col2) = (&group.columns[0], &group.columns[1]);
            let (Some(i1), Some(i2)) = (result.column_index(col1), result.column_index(col2))
            else {
                notices.push(BlendNotice {
                    group: idx,
                    message: format!(
                        "group {} names a column not present in the table; skipped",
                        idx + 1
                    ),
                });
                continue;
            };

            let base = format!("optimized_{col1}_{col2}");
            let name = unique_name(&base, &mut taken);
            if name != base {
                notices.push(BlendNotice {
                    group: idx,
                    message: format!("derived column renamed to '{name}' to stay unique"),
                });
            }

            let w = group.weight;
            for row in result.rows.iter_mut() {
                let blended = match (coerce(&row[i1]), coerce(&row[i2])) {
                    (Some(v1), Some(v2)) => format!("{}", v1 * w + v2 * (1.0 - w)),
                    _ => String::new(),
                };
                row.push(blended);
            }
            result.headers.push(name);
        }

        Ok((result, notices))
    }

    /// Blend after a drop step, refusing the flagged-empty outcome.
    ///
    /// Returns `None` when every column was dropped upstream; callers must
    /// then skip export as well.
    pub fn blend_outcome(
        outcome: &DropOutcome,
        groups: &[BlendGroup],
    ) -> Result<Option<(DataTable, Vec<BlendNotice>)>> {
        match outcome.table() {
            Some(table) => Self::blend(table, groups).map(Some),
            None => Ok(None),
        }
    }
}

/// Numeric coercion: missing and non-numeric cells yield `None`.
fn coerce(cell: &str) -> Option<f64> {
    if DataTable::is_null_value(cell) {
        return None;
    }
    cell.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b',',
        )
    }

    #[test]
    fn test_blend_half_weight_is_mean() {
        let table = make_table(vec!["x", "y"], vec![vec!["10", "20"], vec!["1", "2"]]);
        let (result, notices) =
            Blender::blend(&table, &[BlendGroup::new("x", "y", 0.5)]).unwrap();

        assert!(notices.is_empty());
        assert_eq!(result.headers, vec!["x", "y", "optimized_x_y"]);
        assert_eq!(result.rows[0][2], "15");
        assert_eq!(result.rows[1][2], "1.5");
    }

    #[test]
    fn test_blend_full_weight_reproduces_first_column() {
        let table = make_table(vec!["x", "y"], vec![vec!["10", "20"], vec!["7.5", "9"]]);
        let (result, _) = Blender::blend(&table, &[BlendGroup::new("x", "y", 1.0)]).unwrap();

        assert_eq!(result.rows[0][2], "10");
        assert_eq!(result.rows[1][2], "7.5");
    }

    #[test]
    fn test_blend_zero_weight_reproduces_second_column() {
        let table = make_table(vec!["x", "y"], vec![vec!["10", "20"]]);
        let (result, _) = Blender::blend(&table, &[BlendGroup::new("x", "y", 0.0)]).unwrap();

        assert_eq!(result.rows[0][2], "20");
    }

    #[test]
    fn test_missing_operand_yields_missing_result() {
        let table = make_table(
            vec!["x", "y"],
            vec![vec!["10", ""], vec!["NA", "20"], vec!["abc", "20"]],
        );
        let (result, _) = Blender::blend(&table, &[BlendGroup::new("x", "y", 0.5)]).unwrap();

        assert_eq!(result.rows[0][2], "");
        assert_eq!(result.rows[1][2], "");
        assert_eq!(result.rows[2][2], "");
    }

    #[test]
    fn test_wrong_column_count_skipped_with_notice() {
        let table = make_table(vec!["x", "y", "z"], vec![vec!["1", "2", "3"]]);
        let group = BlendGroup {
            columns: vec!["x".to_string(), "y".to_string(), "z".to_string()],
            weight: 0.5,
        };
        let (result, notices) = Blender::blend(&table, &[group]).unwrap();

        assert_eq!(result.column_count(), 3);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].group, 0);
    }

    #[test]
    fn test_unknown_column_skipped_with_notice() {
        let table = make_table(vec!["x"], vec![vec!["1"]]);
        let (result, notices) =
            Blender::blend(&table, &[BlendGroup::new("x", "nope", 0.5)]).unwrap();

        assert_eq!(result.column_count(), 1);
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn test_name_collision_uniquified() {
        let table = make_table(
            vec!["x", "y", "optimized_x_y"],
            vec![vec!["1", "3", "junk"]],
        );
        let (result, notices) =
            Blender::blend(&table, &[BlendGroup::new("x", "y", 0.5)]).unwrap();

        assert_eq!(result.headers.last().unwrap(), "optimized_x_y_2");
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn test_invalid_weight_is_config_error() {
        let table = make_table(vec!["x", "y"], vec![vec!["1", "2"]]);
        let err = Blender::blend(&table, &[BlendGroup::new("x", "y", 1.5)]).unwrap_err();
        assert!(matches!(err, FuseError::Config(_)));
    }

    #[test]
    fn test_originals_untouched() {
        let table = make_table(vec!["x", "y"], vec![vec!["10", "20"]]);
        let (result, _) = Blender::blend(&table, &[BlendGroup::new("x", "y", 0.3)]).unwrap();

        assert_eq!(result.rows[0][0], "10");
        assert_eq!(result.rows[0][1], "20");
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_blend_outcome_all_dropped_is_none() {
        let outcome = DropOutcome::AllDropped;
        let result = Blender::blend_outcome(&outcome, &[]).unwrap();
        assert!(result.is_none());
    }
}
