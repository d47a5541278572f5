//! Tablefuse: schema matching and record fusion for tabular datasets.
//!
//! Tablefuse aligns the columns of two in-memory tables — by exact name
//! intersection or by similarity scoring — and merges their records into
//! one table, with optional column dropping and weighted-blend derivation.
//!
//! # Core Principles
//!
//! - **Pure stages**: every step is a function of (inputs, parameters)
//!   with no hidden state, so re-running is always safe
//! - **Non-destructive**: input tables are never modified; each stage
//!   returns a new table
//! - **Confirmed correspondences only**: matchers propose, the caller
//!   confirms — nothing unreviewed reaches the fused output
//!
//! # Example
//!
//! ```no_run
//! use tablefuse::{FusionPlan, FusionRequest, TableFuse};
//!
//! let fuse = TableFuse::new();
//! let result = fuse.run(&FusionRequest {
//!     file_a: "sensors_a.csv".into(),
//!     file_b: "sensors_b.csv".into(),
//!     plan: FusionPlan::Join { keys: vec!["id".into()] },
//!     drop: vec![],
//!     blends: vec![],
//! }).unwrap();
//!
//! println!("fused rows: {}", result.report.fused.unwrap().rows);
//! ```

pub mod blend;
pub mod error;
pub mod export;
pub mod fusion;
pub mod input;
pub mod matching;
pub mod schema;

mod tablefuse;

pub use crate::tablefuse::{
    FuseConfig, FusedSummary, FusionPlan, FusionReport, FusionRequest, MatchStrategy, RunOutcome,
    RunResult, TableFuse,
};
pub use blend::{BlendGroup, BlendNotice, Blender};
pub use error::{FuseError, Result};
pub use export::{ExportConfig, Exporter};
pub use fusion::{drop_columns, fuse_join, fuse_stitch, DropOutcome};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use matching::{
    ColumnCorrespondence, ColumnScorer, ColumnView, ExactNameMatcher, MatchOutcome,
    NameValueScorer, ScoredMatcher, ScorerWeights,
};
pub use schema::{ColumnProfile, ColumnType, Profiler};
