//! HexMerge CLI - Command-line interface to the rules engine
//!
//! Commands:
//! - board: Print the board layout
//! - format: Abbreviate tile values
//! - sample: Draw tile values and show the distribution
//! - pick: Map a screen position to a cell
//! - conformance: Emit the conformance report as JSON

mod board_cmd;
mod conformance_cmd;
mod format_cmd;
mod pick_cmd;
mod sample_cmd;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use hexmerge_core::GameConfig;

#[derive(Parser)]
#[command(name = "hexmerge")]
#[command(about = "HexMerge rules engine tools")]
struct Cli {
    /// Game config JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Random seed (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board layout
    Board(board_cmd::BoardArgs),
    /// Abbreviate tile values
    Format(format_cmd::FormatArgs),
    /// Draw tile values and show the distribution
    Sample(sample_cmd::SampleArgs),
    /// Map a screen position to a cell
    Pick(pick_cmd::PickArgs),
    /// Emit the conformance report
    Conformance(conformance_cmd::ConformanceArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command {
        Commands::Board(args) => board_cmd::run(args, &config),
        Commands::Format(args) => format_cmd::run(args),
        Commands::Sample(args) => sample_cmd::run(args, &config),
        Commands::Pick(args) => pick_cmd::run(args, &config),
        Commands::Conformance(args) => conformance_cmd::run(args, &config),
    }
}

/// Logs go to stderr so JSON on stdout stays clean
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let config = GameConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(GameConfig::default()),
    }
}

/// Seeded RNG when a seed is configured, entropy otherwise
pub(crate) fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
