//! Board command - print the board layout and its state predicates
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_board(), report_text(), report_json()
//! - Level 3: cell_row()
//! - Level 4: configuration

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use hexmerge_core::{Board, Cell, GameConfig, HexCoord};

use crate::make_rng;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BoardArgs {
    /// Number of random initial tiles to place
    #[arg(long, default_value = "0")]
    pub tiles: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CellRow {
    coord: HexCoord,
    offset: (i32, i32),
    pixel: (f64, f64),
    value: f64,
    label: String,
    crown: bool,
}

#[derive(Serialize)]
struct BoardReport {
    radius: i32,
    cells: Vec<CellRow>,
    empty: usize,
    full: bool,
    has_valid_merge: bool,
    highest: Option<HexCoord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run board command
///
/// 1. Build the board (optionally seeded with tiles)
/// 2. Report as text or JSON
pub fn run(args: BoardArgs, config: &GameConfig) -> Result<()> {
    let board = build_board(&args, config)?;

    tracing::info!(
        "Board radius {} with {} cells ({} occupied)",
        board.radius(),
        board.cell_count(),
        board.cell_count() - board.empty_cells().len()
    );

    let report = BoardReport {
        radius: board.radius(),
        cells: board.cells().iter().map(|c| cell_row(c, config)).collect(),
        empty: board.empty_cells().len(),
        full: board.is_full(),
        has_valid_merge: board.has_valid_merge(),
        highest: board.highest_value_cell().map(Cell::coord),
    };

    if args.json {
        report_json(&report)
    } else {
        report_text(&report);
        Ok(())
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_board(args: &BoardArgs, config: &GameConfig) -> Result<Board> {
    let mut board = config.board()?;
    if args.tiles > 0 {
        let mut rng = make_rng(config.seed);
        board.seed_initial_tiles(args.tiles, &mut rng)?;
        board.refresh_crowns();
    }
    Ok(board)
}

fn report_text(report: &BoardReport) {
    let mut current_row = None;
    for row in &report.cells {
        if current_row != Some(row.coord.r) {
            current_row = Some(row.coord.r);
            println!("row r={}", row.coord.r);
        }
        let label = if row.label.is_empty() { "." } else { row.label.as_str() };
        println!(
            "  {:>9} offset=({:>2}, {:>2}) pixel=({:>8.2}, {:>8.2}) {:>5}{}",
            row.coord.to_string(),
            row.offset.0,
            row.offset.1,
            row.pixel.0,
            row.pixel.1,
            label,
            if row.crown { " *" } else { "" }
        );
    }
    println!();
    println!("Empty cells:     {}", report.empty);
    println!("Full:            {}", report.full);
    println!("Merge available: {}", report.has_valid_merge);
    match report.highest {
        Some(coord) => println!("Highest tile:    {}", coord),
        None => println!("Highest tile:    none"),
    }
}

fn report_json(report: &BoardReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn cell_row(cell: &Cell, config: &GameConfig) -> CellRow {
    let coord = cell.coord();
    CellRow {
        coord,
        offset: coord.to_offset(),
        pixel: config.orientation.hex_to_pixel(coord, config.hex_size),
        value: cell.value(),
        label: cell.display_text(),
        crown: cell.has_crown(),
    }
}
