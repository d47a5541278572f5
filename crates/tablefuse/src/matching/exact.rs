//! Exact column-name matching.

use std::collections::HashSet;

use crate::error::{FuseError, Result};
use crate::input::DataTable;

/// Matches columns by exact name equality across two tables.
pub struct ExactNameMatcher;

impl ExactNameMatcher {
    /// Candidate match columns: the intersection of both header sets, in
    /// first-table column order.
    ///
    /// Errors with `EmptyInput` when either table has no rows and with
    /// `NoMatch` when the tables share no column name.
    pub fn candidates(a: &DataTable, b: &DataTable) -> Result<Vec<String>> {
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

        let b_names: HashSet<&str> = b.headers.iter().map(|h| h.as_str()).collect();
        let shared: Vec<String> = a
            .headers
            .iter()
            .filter(|h| b_names.contains(h.as_str()))
            .cloned()
            .collect();

        if shared.is_empty() {
            return Err(FuseError::NoMatch(
                "tables share no column name".to_string(),
            ));
        }

        Ok(shared)
    }

    /// Check that a user selection is a subset of the candidate set.
    pub fn validate_selection(selection: &[String], candidates: &[String]) -> Result<()> {
        let allowed: HashSet<&str> = candidates.iter().map(|c| c.as_str()).collect();
        if selection.iter().all(|s| allowed.contains(s.as_str())) {
            Ok(())
        } else {
            Err(FuseError::InvalidSelection {
                requested: selection.to_vec(),
                allowed: candidates.to_vec(),
            })
        }
    }
}
