//! Column profiling: logical type inference and distribution summaries.
//!
//! Profiles feed the similarity-scoring matcher; they are derived from the
//! cell text on demand and never stored back into the table.

mod profile;
mod types;

pub use profile::{ColumnProfile, Profiler};
pub use types::ColumnType;
