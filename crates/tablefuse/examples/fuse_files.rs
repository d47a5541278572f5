//! Example: fuse two tabular files on a shared key column.
//!
//! Usage:
//!   cargo run --example fuse_files -- <file_a> <file_b> <key>
//!
//! Example:
//!   cargo run --example fuse_files -- sensors_2023.csv sensors_2024.csv device_id

use std::env;
use std::path::Path;

use tablefuse::{FusionPlan, FusionRequest, RunOutcome, TableFuse};

fn main() -> tablefuse::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        eprintln!("Usage: cargo run --example fuse_files -- <file_a> <file_b> <key>");
        std::process::exit(1);
    }

    for file in [&args[1], &args[2]] {
        if !Path::new(file).exists() {
            eprintln!("Error: File not found: {}", file);
            std::process::exit(1);
        }
    }

    let fuse = TableFuse::new();
    let result = fuse.run(&FusionRequest {
        file_a: args[1].clone().into(),
        file_b: args[2].clone().into(),
        plan: FusionPlan::Join {
            keys: vec![args[3].clone()],
        },
        drop: Vec::new(),
        blends: Vec::new(),
    })?;

    println!("## Sources");
    println!(
        "  {}: {} rows, {} columns",
        result.report.source_a.file, result.report.source_a.row_count, result.report.source_a.column_count
    );
    println!(
        "  {}: {} rows, {} columns",
        result.report.source_b.file, result.report.source_b.row_count, result.report.source_b.column_count
    );
    println!();

    match result.report.outcome {
        RunOutcome::Fused => {
            let summary = result.report.fused.expect("fused summary present");
            println!("## Fused table");
            println!("  {} rows x {} columns", summary.rows, summary.columns.len());
            println!("  columns: {}", summary.columns.join(", "));

            if let Some(bytes) = result.export {
                println!("  export: {} bytes of CSV", bytes.len());
            }
        }
        RunOutcome::SkippedInvalidSelection => {
            println!("Key is not shared by both tables; nothing was produced.");
        }
        RunOutcome::AllColumnsDropped => {
            println!("Every column was dropped; nothing to export.");
        }
    }

    Ok(())
}
