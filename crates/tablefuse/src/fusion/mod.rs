//! Record fusion: combining two tables into one.
//!
//! Join mode performs a full outer join on shared key columns; row-stitch
//! mode stacks the rows of both tables and aligns matched columns. Both
//! modes satisfy the no-row-loss invariant and leave their inputs
//! untouched, and both produce tables with unique column names.

mod columns;
mod join;
mod stitch;

pub use columns::{drop_columns, DropOutcome};
pub(crate) use columns::unique_name;
pub use join::fuse_join;
pub use stitch::fuse_stitch;
