//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tablefuse: schema matching and record fusion for tabular datasets
#[derive(Parser)]
#[command(name = "tablefuse")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview a data file: head rows and per-column profile
    Inspect {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of rows to preview
        #[arg(short, long, default_value = "5")]
        rows: usize,

        /// Source text encoding (utf-8, gbk, ...)
        #[arg(long, default_value = "utf-8")]
        encoding: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Propose column correspondences between two files
    Candidates {
        /// Path to the first data file
        #[arg(value_name = "FILE_A")]
        file_a: PathBuf,

        /// Path to the second data file
        #[arg(value_name = "FILE_B")]
        file_b: PathBuf,

        /// Use similarity scoring instead of exact name intersection
        #[arg(long)]
        scored: bool,

        /// Score threshold for the scored strategy (0.0-1.0)
        #[arg(short, long, default_value = "0.8")]
        threshold: f64,

        /// Source text encoding (utf-8, gbk, ...)
        #[arg(long, default_value = "utf-8")]
        encoding: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fuse two files and export the merged table
    Fuse {
        /// Path to the first data file
        #[arg(value_name = "FILE_A")]
        file_a: PathBuf,

        /// Path to the second data file
        #[arg(value_name = "FILE_B")]
        file_b: PathBuf,

        /// Join keys for outer-join fusion (comma-separated column names)
        #[arg(short, long, value_delimiter = ',', conflicts_with_all = ["pairs", "stack"])]
        keys: Vec<String>,

        /// Column pairs for row-stitch fusion, as colA=colB (comma-separated)
        #[arg(short, long, value_delimiter = ',', conflicts_with = "stack")]
        pairs: Vec<String>,

        /// Row-stitch with no correspondences (pure stacking)
        #[arg(long)]
        stack: bool,

        /// Columns to drop from the fused table (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        drop: Vec<String>,

        /// Weighted blend group as col1:col2:weight (repeatable, max 10)
        #[arg(short, long)]
        blend: Vec<String>,

        /// Output path (default: merged_dataframe.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Omit the leading row-index column
        #[arg(long)]
        no_index: bool,

        /// Source text encoding (utf-8, gbk, ...)
        #[arg(long, default_value = "utf-8")]
        encoding: String,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(format!("Unknown format: {}. Use csv or tsv.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}
