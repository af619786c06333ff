//! Pick command - map a screen position to a board cell

use anyhow::{Context, Result};
use clap::Args;

use hexmerge_core::{GameConfig, Orientation};

#[derive(Args)]
pub struct PickArgs {
    /// Horizontal position relative to the board centre
    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,

    /// Vertical position relative to the board centre
    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,

    /// Use the pointy-top mapping instead of the configured one
    #[arg(long)]
    pub pointy: bool,
}

pub fn run(args: PickArgs, config: &GameConfig) -> Result<()> {
    let orientation = if args.pointy {
        Orientation::PointyTop
    } else {
        config.orientation
    };
    let board = config.board()?;
    let coord = orientation
        .pixel_to_hex(args.x, args.y, config.hex_size)
        .with_context(|| format!("Position ({}, {}) does not map to a hex", args.x, args.y))?;

    tracing::debug!(
        "Pick ({}, {}) with {:?} at size {} -> {}",
        args.x,
        args.y,
        orientation,
        config.hex_size,
        coord
    );

    let (col, row) = coord.to_offset();
    let on_board = board.contains(coord);
    println!(
        "{} s={} offset=({}, {}) {}",
        coord,
        coord.s(),
        col,
        row,
        if on_board { "on board" } else { "off board" }
    );
    Ok(())
}
