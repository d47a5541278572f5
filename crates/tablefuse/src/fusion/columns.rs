//! Column-level helpers shared by the fusion modes.

use std::collections::HashSet;

use crate::input::DataTable;

/// Pick a column name not yet taken, appending `_2`, `_3`, ... on
/// collision, and record the chosen name as taken.
pub(crate) fn unique_name(base: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(base.to_string()) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Result of the column-drop step.
#[derive(Debug, Clone)]
pub enum DropOutcome {
    /// The filtered table.
    Table(DataTable),
    /// Every column was removed; downstream steps must not run.
    AllDropped,
}

impl DropOutcome {
    /// The surviving table, if any columns remain.
    pub fn table(&self) -> Option<&DataTable> {
        match self {
            DropOutcome::Table(t) => Some(t),
            DropOutcome::AllDropped => None,
        }
    }
}

/// Remove the named columns from a table. Names that do not exist are
/// ignored. Removing every column yields [`DropOutcome::AllDropped`]
/// instead of an empty table.
pub fn drop_columns(table: &DataTable, names: &[String]) -> DropOutcome {
    let to_drop: HashSet<&str> = names.iter().map(|n| n.as_str()).collect();
    let kept: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !to_drop.contains(h.as_str()))
        .map(|(i, _)| i)
        .collect();

    if kept.is_empty() {
        return DropOutcome::AllDropped;
    }

    let headers = kept.iter().map(|&i| table.headers[i].clone()).collect();
    let rows = table
        .rows
        .iter()
        .map(|row| kept.iter().map(|&i| row[i].clone()).collect())
        .collect();

    DropOutcome::Table(DataTable::new(headers, rows, table.delimiter))
}
