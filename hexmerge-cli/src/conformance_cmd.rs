//! Conformance command - emit the rule outputs for the fixed inputs as JSON

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexmerge_core::{ConformanceReport, GameConfig};

#[derive(Args)]
pub struct ConformanceArgs {
    /// Write to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: ConformanceArgs, config: &GameConfig) -> Result<()> {
    let board = config.board()?;
    let report = ConformanceReport::build(&board);

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            tracing::info!("Saved conformance report to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
