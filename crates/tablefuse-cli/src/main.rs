//! Tablefuse CLI - schema matching and record fusion for tabular data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            file,
            rows,
            encoding,
            json,
        } => commands::inspect::run(file, rows, encoding, json, cli.verbose),

        Commands::Candidates {
            file_a,
            file_b,
            scored,
            threshold,
            encoding,
            json,
        } => commands::candidates::run(file_a, file_b, scored, threshold, encoding, json),

        Commands::Fuse {
            file_a,
            file_b,
            keys,
            pairs,
            stack,
            drop,
            blend,
            output,
            format,
            no_index,
            encoding,
            json,
        } => commands::fuse::run(commands::fuse::FuseArgs {
            file_a,
            file_b,
            keys,
            pairs,
            stack,
            drop,
            blend,
            output,
            format,
            no_index,
            encoding,
            json,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
