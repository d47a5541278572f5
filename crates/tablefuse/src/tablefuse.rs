//! Main TableFuse struct and public pipeline API.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::blend::{BlendGroup, BlendNotice, Blender};
use crate::error::{FuseError, Result};
use crate::export::{ExportConfig, Exporter};
use crate::fusion::{drop_columns, fuse_join, fuse_stitch, DropOutcome};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::matching::{
    ColumnCorrespondence, ExactNameMatcher, MatchOutcome, NameValueScorer, ScoredMatcher,
    ScorerWeights,
};

/// Column-matching strategy selection.
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    /// Intersect column names exactly.
    ExactName,
    /// Score every cross-table pair; keep scores above the threshold.
    Scored { threshold: f64 },
}

impl Default for MatchStrategy {
    fn default() -> Self {
        MatchStrategy::ExactName
    }
}

/// Configuration for the fusion pipeline.
#[derive(Debug, Clone, Default)]
pub struct FuseConfig {
    /// Parser configuration (shared by both inputs).
    pub parser: ParserConfig,
    /// Matching strategy.
    pub strategy: MatchStrategy,
    /// Component weights for the default scorer.
    pub scorer_weights: ScorerWeights,
    /// Export configuration.
    pub export: ExportConfig,
}

/// How the two tables should be fused, as confirmed by the user.
#[derive(Debug, Clone)]
pub enum FusionPlan {
    /// Full outer join on these shared key columns.
    Join { keys: Vec<String> },
    /// Row-stitch over these column correspondences.
    Stitch { pairs: Vec<ColumnCorrespondence> },
}

/// One full pipeline invocation: inputs plus every user-chosen parameter.
#[derive(Debug, Clone)]
pub struct FusionRequest {
    /// Path to the first table.
    pub file_a: PathBuf,
    /// Path to the second table.
    pub file_b: PathBuf,
    /// Confirmed fusion plan.
    pub plan: FusionPlan,
    /// Columns to drop from the fused table.
    pub drop: Vec<String>,
    /// Weighted-blend groups to derive.
    pub blends: Vec<BlendGroup>,
}

/// Terminal state of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Fusion completed and the result was exported.
    Fused,
    /// The key selection was invalid; nothing was produced (no-op).
    SkippedInvalidSelection,
    /// The drop step removed every column; optimization and export were
    /// skipped.
    AllColumnsDropped,
}

/// Shape summary of a fused table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusedSummary {
    /// Column names in output order.
    pub columns: Vec<String>,
    /// Row count.
    pub rows: usize,
}

/// Report of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionReport {
    /// Metadata for the first source.
    pub source_a: SourceMetadata,
    /// Metadata for the second source.
    pub source_b: SourceMetadata,
    /// Terminal state.
    pub outcome: RunOutcome,
    /// Shape of the final table, when one was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fused: Option<FusedSummary>,
    /// Non-fatal notices from the blend step.
    pub notices: Vec<BlendNotice>,
    /// Size of the exported byte stream, when export happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_bytes: Option<usize>,
}

impl FusionReport {
    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Everything a completed run yields.
#[derive(Debug)]
pub struct RunResult {
    /// The run report.
    pub report: FusionReport,
    /// The final table (present unless the run was skipped or emptied).
    pub table: Option<DataTable>,
    /// The exported byte stream (present when `outcome` is `Fused`).
    pub export: Option<Vec<u8>>,
}

/// The fusion pipeline engine.
///
/// Every method is a pure function of its inputs and the configuration;
/// re-running with the same arguments yields the same result.
pub struct TableFuse {
    config: FuseConfig,
    parser: Parser,
    exporter: Exporter,
}

impl TableFuse {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(FuseConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: FuseConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let exporter = Exporter::with_config(config.export.clone());
        Self {
            config,
            parser,
            exporter,
        }
    }

    /// Load one table from disk.
    pub fn load(&self, path: impl Into<PathBuf>) -> Result<(DataTable, SourceMetadata)> {
        self.parser.parse_file(path.into())
    }

    /// Propose column correspondences between two loaded tables, using the
    /// configured strategy. Proposals still need user confirmation before
    /// they reach fusion.
    pub fn match_columns(&self, a: &DataTable, b: &DataTable) -> Result<MatchOutcome> {
        match self.config.strategy {
            MatchStrategy::ExactName => Ok(MatchOutcome::ExactName {
                candidates: ExactNameMatcher::candidates(a, b)?,
            }),
            MatchStrategy::Scored { threshold } => {
                let scorer = NameValueScorer::with_weights(self.config.scorer_weights.clone());
                let matcher = ScoredMatcher::with_scorer(scorer, threshold);
                Ok(MatchOutcome::Scored {
                    pairs: matcher.candidates(a, b)?,
                })
            }
        }
    }

    /// Fuse two loaded tables according to a confirmed plan.
    pub fn fuse(&self, a: &DataTable, b: &DataTable, plan: &FusionPlan) -> Result<DataTable> {
        match plan {
            FusionPlan::Join { keys } => {
                let candidates = ExactNameMatcher::candidates(a, b)?;
                ExactNameMatcher::validate_selection(keys, &candidates)?;
                fuse_join(a, b, keys)
            }
            FusionPlan::Stitch { pairs } => fuse_stitch(a, b, pairs),
        }
    }

    /// Execute the whole pipeline: load, fuse, drop, blend, export.
    ///
    /// An invalid key selection, or a stitch pair naming a column that does
    /// not exist, is reported as a skipped run rather than an error; load
    /// failures, empty inputs, and missing matches propagate as errors for
    /// the caller to surface.
    pub fn run(&self, request: &FusionRequest) -> Result<RunResult> {
        let (table_a, source_a) = self.load(&request.file_a)?;
        let (table_b, source_b) = self.load(&request.file_b)?;

        let fused = match self.fuse(&table_a, &table_b, &request.plan) {
            Ok(t) => t,
            Err(FuseError::InvalidSelection { .. }) | Err(FuseError::UnknownColumn(_)) => {
                return Ok(RunResult {
                    report: FusionReport {
                        source_a,
                        source_b,
                        outcome: RunOutcome::SkippedInvalidSelection,
                        fused: None,
                        notices: Vec::new(),
                        export_bytes: None,
                    },
                    table: None,
                    export: None,
                });
            }
            Err(e) => return Err(e),
        };

        let dropped = drop_columns(&fused, &request.drop);
        let table = match dropped {
            DropOutcome::Table(t) => t,
            DropOutcome::AllDropped => {
                return Ok(RunResult {
                    report: FusionReport {
                        source_a,
                        source_b,
                        outcome: RunOutcome::AllColumnsDropped,
                        fused: None,
                        notices: Vec::new(),
                        export_bytes: None,
                    },
                    table: None,
                    export: None,
                });
            }
        };

        let (table, notices) = Blender::blend(&table, &request.blends)?;
        let export = self.exporter.to_bytes(&table)?;

        let report = FusionReport {
            source_a,
            source_b,
            outcome: RunOutcome::Fused,
            fused: Some(FusedSummary {
                columns: table.headers.clone(),
                rows: table.row_count(),
            }),
            notices,
            export_bytes: Some(export.len()),
        };

        Ok(RunResult {
            report,
            table: Some(table),
            export: Some(export),
        })
    }
}

impl Default for TableFuse {
    fn default() -> Self {
        Self::new()
    }
}
