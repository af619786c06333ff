//! Sample command - draw tile values and report the observed distribution
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: draw_values(), report_results()
//! - Level 3: histogram()
//! - Level 4: configuration

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use hexmerge_core::value::refill_levels;
use hexmerge_core::{
    format_value, random_initial_tile_value, random_new_tile_value, random_refill_value,
    tile_level, GameConfig,
};

use crate::make_rng;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SampleKind {
    /// Normal spawn (90% 2, 10% 4)
    New,
    /// Fresh-board seeding (2/4/8/16)
    Initial,
    /// Relative to the smallest displayed value
    Refill,
}

#[derive(Args)]
pub struct SampleArgs {
    /// Which generator to draw from
    #[arg(long, value_enum, default_value = "new")]
    pub kind: SampleKind,

    /// Smallest displayed value (refill only)
    #[arg(long, default_value = "2")]
    pub floor: f64,

    /// Number of draws
    #[arg(long, default_value = "10000")]
    pub count: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Bucket {
    value: f64,
    label: String,
    count: usize,
    fraction: f64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run sample command
///
/// 1. Draw `count` values from the chosen generator
/// 2. Report the histogram
pub fn run(args: SampleArgs, config: &GameConfig) -> Result<()> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }

    tracing::info!(
        "Sampling {} values from {:?} generator (seed={:?})",
        args.count,
        args.kind,
        config.seed
    );
    if args.kind == SampleKind::Refill {
        tracing::debug!("Refill candidates: {:?}", refill_levels(args.floor));
    }

    let values = draw_values(&args, config);
    let buckets = histogram(&values);

    report_results(&buckets, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn draw_values(args: &SampleArgs, config: &GameConfig) -> Vec<f64> {
    let mut rng = make_rng(config.seed);
    (0..args.count)
        .map(|_| match args.kind {
            SampleKind::New => random_new_tile_value(&mut rng),
            SampleKind::Initial => random_initial_tile_value(&mut rng),
            SampleKind::Refill => random_refill_value(args.floor, &mut rng),
        })
        .collect()
}

fn report_results(buckets: &[Bucket], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(buckets)?);
        return Ok(());
    }

    println!("{:>8}  {:>8}  {:>8}", "value", "count", "share");
    for bucket in buckets {
        println!(
            "{:>8}  {:>8}  {:>7.2}%",
            bucket.label,
            bucket.count,
            bucket.fraction * 100.0
        );
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Group draws by level, ascending
fn histogram(values: &[f64]) -> Vec<Bucket> {
    let mut counts: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for &value in values {
        counts.entry(tile_level(value)).or_insert((value, 0)).1 += 1;
    }

    let total = values.len() as f64;
    counts
        .into_values()
        .map(|(value, count)| Bucket {
            value,
            label: format_value(value),
            count,
            fraction: count as f64 / total,
        })
        .collect()
}
