//! Per-column profiling over cell text.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::ColumnType;
use crate::input::DataTable;

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), // ISO date
        Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(), // US date
        Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap(), // Alt ISO
    ]
});

/// Share of non-null values that must parse as a type for it to win.
const TYPE_THRESHOLD: f64 = 0.9;

/// Distinct-value cap below which the full value set is retained.
const DISTINCT_SAMPLE_CAP: usize = 20;

/// Summary of one column's contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Column position in the table.
    pub position: usize,
    /// Inferred logical type.
    pub inferred_type: ColumnType,
    /// Share of values that are missing.
    pub null_ratio: f64,
    /// Number of distinct non-null values.
    pub distinct_count: usize,
    /// Whether all non-null values are distinct.
    pub unique: bool,
    /// The distinct non-null values, when there are few enough to retain.
    pub distinct_values: Option<Vec<String>>,
}

/// Computes column profiles for a table.
pub struct Profiler;

impl Profiler {
    /// Profile every column of a table.
    pub fn profile_table(table: &DataTable) -> Vec<ColumnProfile> {
        table
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| Self::profile_column(table, idx, name))
            .collect()
    }

    /// Profile a single column.
    pub fn profile_column(table: &DataTable, index: usize, name: &str) -> ColumnProfile {
        let total = table.row_count();
        let non_null: Vec<&str> = table
            .column_values(index)
            .filter(|v| !DataTable::is_null_value(v))
            .collect();

        let null_ratio = if total == 0 {
            0.0
        } else {
            (total - non_null.len()) as f64 / total as f64
        };

        let distinct: BTreeSet<&str> = non_null.iter().copied().collect();
        let distinct_count = distinct.len();
        let unique = !non_null.is_empty() && distinct_count == non_null.len();
        let distinct_values = (distinct_count > 0 && distinct_count <= DISTINCT_SAMPLE_CAP)
            .then(|| distinct.iter().map(|s| s.to_string()).collect());

        ColumnProfile {
            name: name.to_string(),
            position: index,
            inferred_type: infer_type(&non_null),
            null_ratio,
            distinct_count,
            unique,
            distinct_values,
        }
    }
}

/// Infer the logical type of a column from its non-null values.
fn infer_type(values: &[&str]) -> ColumnType {
    if values.is_empty() {
        return ColumnType::Unknown;
    }

    let total = values.len() as f64;
    let ratio = |count: usize| count as f64 / total;

    let booleans = values.iter().filter(|v| is_boolean(v)).count();
    if ratio(booleans) >= TYPE_THRESHOLD {
        return ColumnType::Boolean;
    }

    let integers = values
        .iter()
        .filter(|v| v.trim().parse::<i64>().is_ok())
        .count();
    if ratio(integers) >= TYPE_THRESHOLD {
        return ColumnType::Integer;
    }

    let floats = values
        .iter()
        .filter(|v| v.trim().parse::<f64>().is_ok())
        .count();
    if ratio(floats) >= TYPE_THRESHOLD {
        return ColumnType::Float;
    }

    let dates = values
        .iter()
        .filter(|v| DATE_PATTERNS.iter().any(|p| p.is_match(v.trim())))
        .count();
    if ratio(dates) >= TYPE_THRESHOLD {
        return ColumnType::Date;
    }

    ColumnType::String
}

fn is_boolean(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "y" | "n" | "t" | "f"
    )
}
