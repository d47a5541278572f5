//! Fuse command - run the full pipeline and export the merged table.

use std::path::PathBuf;

use colored::Colorize;
use tablefuse::{
    BlendGroup, ColumnCorrespondence, ExportConfig, FuseConfig, FuseError, FusionPlan,
    FusionRequest, ParserConfig, RunOutcome, TableFuse,
};

use crate::cli::OutputFormat;

/// Maximum number of blend groups accepted per run.
const MAX_BLEND_GROUPS: usize = 10;

pub struct FuseArgs {
    pub file_a: PathBuf,
    pub file_b: PathBuf,
    pub keys: Vec<String>,
    pub pairs: Vec<String>,
    pub stack: bool,
    pub drop: Vec<String>,
    pub blend: Vec<String>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub no_index: bool,
    pub encoding: String,
    pub json: bool,
}

pub fn run(args: FuseArgs) -> Result<(), Box<dyn std::error::Error>> {
    for file in [&args.file_a, &args.file_b] {
        if !file.exists() {
            return Err(format!("File not found: {}", file.display()).into());
        }
    }

    let plan = build_plan(&args)?;
    let blends = parse_blend_groups(&args.blend)?;

    let delimiter = match args.format {
        OutputFormat::Csv => b',',
        OutputFormat::Tsv => b'\t',
    };
    let export = ExportConfig {
        delimiter,
        include_index: !args.no_index,
        ..ExportConfig::default()
    };
    let default_name = match args.format {
        OutputFormat::Csv => "merged_dataframe.csv",
        OutputFormat::Tsv => "merged_dataframe.tsv",
    };

    let fuse = TableFuse::with_config(FuseConfig {
        parser: ParserConfig::with_encoding_label(&args.encoding)?,
        export,
        ..FuseConfig::default()
    });

    let request = FusionRequest {
        file_a: args.file_a.clone(),
        file_b: args.file_b.clone(),
        plan,
        drop: args.drop.clone(),
        blends,
    };

    let result = match fuse.run(&request) {
        Ok(result) => result,
        // Domain halts print inline and leave the process healthy; the
        // user corrects the parameters and re-runs.
        Err(FuseError::EmptyInput(msg)) => {
            println!(
                "{} {} - re-upload a file with data rows",
                "Empty input:".yellow().bold(),
                msg
            );
            return Ok(());
        }
        Err(FuseError::NoMatch(msg)) => {
            println!(
                "{} {} - re-select match columns",
                "No match:".yellow().bold(),
                msg
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", result.report.to_json()?);
    }

    match result.report.outcome {
        RunOutcome::SkippedInvalidSelection => {
            if !args.json {
                println!(
                    "{} selected keys are not shared by both tables; nothing was produced",
                    "Invalid selection:".yellow().bold()
                );
            }
            return Ok(());
        }
        RunOutcome::AllColumnsDropped => {
            if !args.json {
                println!(
                    "{} every column was dropped; re-select the columns to keep",
                    "Warning:".yellow().bold()
                );
            }
            return Ok(());
        }
        RunOutcome::Fused => {}
    }

    for notice in &result.report.notices {
        println!(
            "{} group {}: {}",
            "Notice:".yellow(),
            notice.group + 1,
            notice.message
        );
    }

    let export_bytes = result.export.as_ref().ok_or("missing export stream")?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_name));
    std::fs::write(&output_path, export_bytes)?;

    if !args.json {
        let summary = result
            .report
            .fused
            .as_ref()
            .ok_or("missing fusion summary")?;
        println!(
            "{} {} rows x {} columns",
            "Fused".cyan().bold(),
            summary.rows.to_string().white().bold(),
            summary.columns.len().to_string().white().bold()
        );
        println!(
            "{} {}",
            "Saved to".green().bold(),
            output_path.display().to_string().white()
        );
    }

    Ok(())
}

/// Derive the fusion plan from the mode flags.
fn build_plan(args: &FuseArgs) -> Result<FusionPlan, Box<dyn std::error::Error>> {
    if args.stack {
        return Ok(FusionPlan::Stitch { pairs: Vec::new() });
    }
    if !args.pairs.is_empty() {
        let pairs = args
            .pairs
            .iter()
            .map(|spec| parse_pair(spec))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(FusionPlan::Stitch { pairs });
    }
    if !args.keys.is_empty() {
        return Ok(FusionPlan::Join {
            keys: args.keys.clone(),
        });
    }
    Err("Choose a fusion mode: --keys, --pairs, or --stack".into())
}

/// Parse a `colA=colB` pair specification.
fn parse_pair(spec: &str) -> Result<ColumnCorrespondence, String> {
    match spec.split_once('=') {
        Some((a, b)) if !a.is_empty() && !b.is_empty() => Ok(ColumnCorrespondence::new(a, b)),
        _ => Err(format!("Invalid pair '{}'; expected colA=colB", spec)),
    }
}

/// Parse `col1:col2:weight` blend specifications.
fn parse_blend_groups(specs: &[String]) -> Result<Vec<BlendGroup>, String> {
    if specs.len() > MAX_BLEND_GROUPS {
        return Err(format!(
            "At most {} blend groups are supported, got {}",
            MAX_BLEND_GROUPS,
            specs.len()
        ));
    }

    specs
        .iter()
        .map(|spec| {
            let parts: Vec<&str> = spec.split(':').collect();
            let [col1, col2, weight] = parts.as_slice() else {
                return Err(format!(
                    "Invalid blend '{}'; expected col1:col2:weight",
                    spec
                ));
            };
            let weight: f64 = weight
                .parse()
                .map_err(|_| format!("Invalid blend weight in '{}'", spec))?;
            if !(0.0..=1.0).contains(&weight) {
                return Err(format!("Blend weight {} is outside [0, 1]", weight));
            }
            Ok(BlendGroup::new(*col1, *col2, weight))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        let pair = parse_pair("temp=temperature").unwrap();
        assert_eq!(pair.column_a, "temp");
        assert_eq!(pair.column_b, "temperature");

        assert!(parse_pair("nope").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn test_parse_blend_groups() {
        let groups = parse_blend_groups(&["x:y:0.5".to_string()]).unwrap();
        assert_eq!(groups[0].columns, vec!["x", "y"]);
        assert_eq!(groups[0].weight, 0.5);

        assert!(parse_blend_groups(&["x:y".to_string()]).is_err());
        assert!(parse_blend_groups(&["x:y:2.0".to_string()]).is_err());

        let too_many: Vec<String> = (0..11).map(|i| format!("a{i}:b{i}:0.5")).collect();
        assert!(parse_blend_groups(&too_many).is_err());
    }
}
