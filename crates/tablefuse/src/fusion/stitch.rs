//! Row-stitch fusion: stack both tables' rows, aligning matched columns.

use std::collections::HashSet;

use crate::error::{FuseError, Result};
use crate::input::DataTable;
use crate::matching::ColumnCorrespondence;

use super::columns::unique_name;

/// Fuse two tables by stacking all rows of `a` followed by all rows of `b`.
///
/// Each correspondence pair defines one fused column, named after its
/// `column_a` side (uniquified on collision). A fused cell takes the value
/// from whichever table the row originated in; it never blends both sides.
/// Columns not covered by any pair are carried through unchanged, null for
/// rows from the other table, with `_a`/`_b` suffixes on name collisions.
///
/// The output has exactly `a.row_count() + b.row_count()` rows. An empty
/// pair list is allowed and degrades to pure stacking.
pub fn fuse_stitch(
    a: &DataTable,
    b: &DataTable,
    pairs: &[ColumnCorrespondence],
) -> Result<DataTable> {
    if a.is_empty() {
        return Err(FuseError::EmptyInput("first table has no rows".to_string()));
    }
    if b.is_empty() {
        return Err(FuseError::EmptyInput(
            "second table has no rows".to_string(),
        ));
    }

    // Resolve pair columns up front; a dangling name is a caller error.
    let mut fused: Vec<(usize, usize)> = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let ia = a
            .column_index(&pair.column_a)
            .ok_or_else(|| FuseError::UnknownColumn(pair.column_a.clone()))?;
        let ib = b
            .column_index(&pair.column_b)
            .ok_or_else(|| FuseError::UnknownColumn(pair.column_b.clone()))?;
        fused.push((ia, ib));
    }

    let covered_a: HashSet<usize> = fused.iter().map(|&(ia, _)| ia).collect();
    let covered_b: HashSet<usize> = fused.iter().map(|&(_, ib)| ib).collect();

    let carried_a: Vec<usize> = (0..a.column_count())
        .filter(|i| !covered_a.contains(i))
        .collect();
    let carried_b: Vec<usize> = (0..b.column_count())
        .filter(|i| !covered_b.contains(i))
        .collect();

    let carried_a_names: HashSet<&str> =
        carried_a.iter().map(|&i| a.headers[i].as_str()).collect();
    let carried_b_names: HashSet<&str> =
        carried_b.iter().map(|&i| b.headers[i].as_str()).collect();

    // Output layout: fused columns in pair order, then carried A, then
    // carried B.
    let mut taken: HashSet<String> = HashSet::new();
    let mut headers: Vec<String> =
        Vec::with_capacity(fused.len() + carried_a.len() + carried_b.len());
    for pair in pairs {
        headers.push(unique_name(&pair.column_a, &mut taken));
    }
    for &i in &carried_a {
        let name = &a.headers[i];
        let base = if carried_b_names.contains(name.as_str()) {
            format!("{name}_a")
        } else {
            name.clone()
        };
        headers.push(unique_name(&base, &mut taken));
    }
    for &i in &carried_b {
        let name = &b.headers[i];
        let base = if carried_a_names.contains(name.as_str()) {
            format!("{name}_b")
        } else {
            name.clone()
        };
        headers.push(unique_name(&base, &mut taken));
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(a.row_count() + b.row_count());

    for row in &a.rows {
        let mut out: Vec<String> = Vec::with_capacity(headers.len());
        out.extend(fused.iter().map(|&(ia, _)| row[ia].clone()));
        out.extend(carried_a.iter().map(|&i| row[i].clone()));
        out.extend(std::iter::repeat(String::new()).take(carried_b.len()));
        rows.push(out);
    }
    for row in &b.rows {
        let mut out: Vec<String> = Vec::with_capacity(headers.len());
        out.extend(fused.iter().map(|&(_, ib)| row[ib].clone()));
        out.extend(std::iter::repeat(String::new()).take(carried_a.len()));
        out.extend(carried_b.iter().map(|&i| row[i].clone()));
        rows.push(out);
    }

    Ok(DataTable::new(headers, rows, a.delimiter))
}
