//! Format command - abbreviate tile values the way tiles display them

use anyhow::Result;
use clap::Args;

use hexmerge_core::{format_value, is_valid_tile_value, next_value, tile_level};

#[derive(Args)]
pub struct FormatArgs {
    /// Values to format (e.g. 2048 or 1e33)
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<f64>,
}

pub fn run(args: FormatArgs) -> Result<()> {
    println!("{:>12}  {:>6}  {:>5}  {:>5}  {:>12}", "value", "label", "level", "valid", "next");
    for value in args.values {
        println!(
            "{:>12e}  {:>6}  {:>5}  {:>5}  {:>12e}",
            value,
            format_value(value),
            tile_level(value),
            is_valid_tile_value(value),
            next_value(value)
        );
    }
    Ok(())
}
