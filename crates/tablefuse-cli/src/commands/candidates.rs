//! Candidates command - propose column correspondences between two files.

use std::path::PathBuf;

use colored::Colorize;
use tablefuse::{FuseConfig, FuseError, MatchOutcome, MatchStrategy, ParserConfig, TableFuse};

pub fn run(
    file_a: PathBuf,
    file_b: PathBuf,
    scored: bool,
    threshold: f64,
    encoding: String,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for file in [&file_a, &file_b] {
        if !file.exists() {
            return Err(format!("File not found: {}", file.display()).into());
        }
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(format!("Threshold {} is outside [0, 1]", threshold).into());
    }

    let strategy = if scored {
        MatchStrategy::Scored { threshold }
    } else {
        MatchStrategy::ExactName
    };
    let fuse = TableFuse::with_config(FuseConfig {
        parser: ParserConfig::with_encoding_label(&encoding)?,
        strategy,
        ..FuseConfig::default()
    });

    let (table_a, _) = fuse.load(&file_a)?;
    let (table_b, _) = fuse.load(&file_b)?;

    let outcome = match fuse.match_columns(&table_a, &table_b) {
        Ok(outcome) => outcome,
        // Domain halts are inline messages, not process failures; the user
        // corrects the inputs and re-runs.
        Err(FuseError::EmptyInput(msg)) => {
            println!("{} {}", "Empty input:".yellow().bold(), msg);
            return Ok(());
        }
        Err(FuseError::NoMatch(msg)) => {
            println!(
                "{} {} - pick columns manually or lower the threshold",
                "No match:".yellow().bold(),
                msg
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        MatchOutcome::ExactName { candidates } => {
            println!(
                "{} {} shared column(s)",
                "Found".cyan().bold(),
                candidates.len().to_string().white().bold()
            );
            for name in &candidates {
                println!("  {}", name);
            }
            println!();
            println!(
                "Run {} to fuse on a subset of these.",
                format!(
                    "tablefuse fuse {} {} --keys {}",
                    file_a.display(),
                    file_b.display(),
                    candidates.join(",")
                )
                .cyan()
            );
        }
        MatchOutcome::Scored { pairs } => {
            if pairs.is_empty() {
                println!(
                    "{} no pair scored above {:.2}; fusion would stack all columns unmatched",
                    "Note:".yellow(),
                    threshold
                );
                return Ok(());
            }
            println!(
                "{} {} candidate pair(s) above {:.2}",
                "Found".cyan().bold(),
                pairs.len().to_string().white().bold(),
                threshold
            );
            for pair in &pairs {
                println!(
                    "  {:20} ~ {:20} {:.3}",
                    pair.column_a,
                    pair.column_b,
                    pair.score.unwrap_or(0.0)
                );
            }
            println!();
            println!(
                "Confirm a selection with {}.",
                format!(
                    "tablefuse fuse {} {} --pairs {}",
                    file_a.display(),
                    file_b.display(),
                    pairs
                        .iter()
                        .map(|p| format!("{}={}", p.column_a, p.column_b))
                        .collect::<Vec<_>>()
                        .join(",")
                )
                .cyan()
            );
        }
    }

    Ok(())
}
