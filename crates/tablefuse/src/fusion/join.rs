//! Full outer join on shared key columns.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::{FuseError, Result};
use crate::input::DataTable;

use super::columns::unique_name;

/// Fuse two tables with a full outer join on the given key columns.
///
/// Keys match by exact cell-text equality. Rows of `a` come first, each
/// paired with every `b` row sharing its key tuple (duplicate keys pair
/// m×n); `b` rows whose key never occurs in `a` follow, null-filled on the
/// `a` side. Non-key columns present in both tables are disambiguated with
/// `_a`/`_b` suffixes.
///
/// Errors: `EmptyInput` when either table has no rows, `NoMatch` when the
/// key set is empty, `InvalidSelection` when the keys are not a subset of
/// the shared column names.
pub fn fuse_join(a: &DataTable, b: &DataTable, keys: &[String]) -> Result<DataTable> {
    if a.is_empty() {
        return Err(FuseError::EmptyInput("first table has no rows".to_string()));
    }
    if b.is_empty() {
        return Err(FuseError::EmptyInput(
            "second table has no rows".to_string(),
        ));
    }
    if keys.is_empty() {
        return Err(FuseError::NoMatch("no key columns selected".to_string()));
    }

    let b_names: HashSet<&str> = b.headers.iter().map(|h| h.as_str()).collect();
    let shared: Vec<String> = a
        .headers
        .iter()
        .filter(|h| b_names.contains(h.as_str()))
        .cloned()
        .collect();

    // Resolving key indices doubles as the subset check.
    let mut key_idx_a = Vec::with_capacity(keys.len());
    let mut key_idx_b = Vec::with_capacity(keys.len());
    for key in keys {
        match (a.column_index(key), b.column_index(key)) {
            (Some(ia), Some(ib)) => {
                key_idx_a.push(ia);
                key_idx_b.push(ib);
            }
            _ => {
                return Err(FuseError::InvalidSelection {
                    requested: keys.to_vec(),
                    allowed: shared,
                });
            }
        }
    }

    let key_set: HashSet<&str> = keys.iter().map(|k| k.as_str()).collect();

    let nonkey_a: Vec<usize> = (0..a.column_count())
        .filter(|&i| !key_set.contains(a.headers[i].as_str()))
        .collect();
    let nonkey_b: Vec<usize> = (0..b.column_count())
        .filter(|&i| !key_set.contains(b.headers[i].as_str()))
        .collect();

    let nonkey_a_names: HashSet<&str> = nonkey_a.iter().map(|&i| a.headers[i].as_str()).collect();
    let nonkey_b_names: HashSet<&str> = nonkey_b.iter().map(|&i| b.headers[i].as_str()).collect();

    // Output layout: keys, then A's non-key columns, then B's.
    let mut taken: HashSet<String> = HashSet::new();
    let mut headers: Vec<String> = Vec::with_capacity(keys.len() + nonkey_a.len() + nonkey_b.len());
    for key in keys {
        headers.push(unique_name(key, &mut taken));
    }
    for &i in &nonkey_a {
        let name = &a.headers[i];
        let base = if nonkey_b_names.contains(name.as_str()) {
            format!("{name}_a")
        } else {
            name.clone()
        };
        headers.push(unique_name(&base, &mut taken));
    }
    for &i in &nonkey_b {
        let name = &b.headers[i];
        let base = if nonkey_a_names.contains(name.as_str()) {
            format!("{name}_b")
        } else {
            name.clone()
        };
        headers.push(unique_name(&base, &mut taken));
    }

    // Group B's rows by key tuple, preserving first-seen key order.
    let mut b_groups: IndexMap<Vec<String>, Vec<usize>> = IndexMap::new();
    for (row_idx, row) in b.rows.iter().enumerate() {
        let key: Vec<String> = key_idx_b.iter().map(|&i| row[i].clone()).collect();
        b_groups.entry(key).or_default().push(row_idx);
    }

    let mut matched_keys: HashSet<Vec<String>> = HashSet::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for row_a in &a.rows {
        let key: Vec<String> = key_idx_a.iter().map(|&i| row_a[i].clone()).collect();
        match b_groups.get(&key) {
            Some(b_rows) => {
                matched_keys.insert(key.clone());
                for &bi in b_rows {
                    let mut out = key.clone();
                    out.extend(nonkey_a.iter().map(|&i| row_a[i].clone()));
                    out.extend(nonkey_b.iter().map(|&i| b.rows[bi][i].clone()));
                    rows.push(out);
                }
            }
            None => {
                let mut out = key;
                out.extend(nonkey_a.iter().map(|&i| row_a[i].clone()));
                out.extend(std::iter::repeat(String::new()).take(nonkey_b.len()));
                rows.push(out);
            }
        }
    }

    for (key, b_rows) in &b_groups {
        if matched_keys.contains(key) {
            continue;
        }
        for &bi in b_rows {
            let mut out = key.clone();
            out.extend(std::iter::repeat(String::new()).take(nonkey_a.len()));
            out.extend(nonkey_b.iter().map(|&i| b.rows[bi][i].clone()));
            rows.push(out);
        }
    }

    Ok(DataTable::new(headers, rows, a.delimiter))
}
