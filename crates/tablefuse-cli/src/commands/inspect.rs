//! Inspect command - preview a file and its column profiles.

use std::path::PathBuf;

use colored::Colorize;
use tablefuse::{FuseConfig, ParserConfig, Profiler, TableFuse};

pub fn run(
    file: PathBuf,
    rows: usize,
    encoding: String,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let parser = ParserConfig::with_encoding_label(&encoding)?;
    let fuse = TableFuse::with_config(FuseConfig {
        parser,
        ..FuseConfig::default()
    });

    let (table, source) = fuse.load(&file)?;
    let profiles = Profiler::profile_table(&table);

    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        file.display().to_string().white()
    );
    println!(
        "  {} rows, {} columns ({}, {})",
        source.row_count.to_string().white().bold(),
        source.column_count.to_string().white().bold(),
        source.format,
        source.encoding
    );
    if source.decode_lossy {
        println!(
            "{} some bytes could not be decoded as {} and were replaced",
            "Warning:".yellow().bold(),
            source.encoding
        );
    }

    println!();
    println!("{}", table.headers.join(" | "));
    for row in table.rows.iter().take(rows) {
        println!("{}", row.join(" | "));
    }
    if table.row_count() > rows {
        println!("... {} more rows", table.row_count() - rows);
    }

    println!();
    println!("{}", "Columns:".yellow().bold());
    for profile in &profiles {
        println!(
            "  {:20} {:10} nulls={:<5.2} distinct={:<5} unique={}",
            profile.name,
            format!("{:?}", profile.inferred_type),
            profile.null_ratio,
            profile.distinct_count,
            profile.unique
        );
        if verbose {
            if let Some(values) = &profile.distinct_values {
                println!("                       values: {:?}", values);
            }
        }
    }

    Ok(())
}
