//! Conformance report
//!
//! Every rule evaluated on a fixed set of inputs, serialized as JSON. A second
//! implementation of the rules produces the same document from the same
//! inputs and the two are diffed.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::hex::{HexCoord, Orientation};
use crate::value::{
    format_value, is_valid_tile_value, next_value, pick_initial_tile_value, pick_new_tile_value,
    pick_refill_value, refill_levels, tile_level, tile_value_for_level, LEVEL_COUNT, MAX_VALUE,
};

/// Hex size used for every pixel entry
pub const REPORT_HEX_SIZE: f64 = 1.0;

/// Uniform draws fed to the generators
pub const REPORT_DRAWS: [f64; 11] = [0.0, 0.05, 0.1, 0.25, 0.48, 0.5, 0.72, 0.8, 0.88, 0.95, 0.999];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub coord: HexCoord,
    pub s: i32,
    pub offset: (i32, i32),
    pub pointy: (f64, f64),
    pub flat: (f64, f64),
    pub neighbors: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueEntry {
    pub value: f64,
    pub valid: bool,
    pub label: String,
    pub level: u32,
    pub next: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickEntry {
    pub x: f64,
    pub y: f64,
    pub flat: Option<HexCoord>,
    pub pointy: Option<HexCoord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawEntry {
    pub u: f64,
    pub new_tile: f64,
    pub initial_tile: f64,
    pub refill_from_2: f64,
    pub refill_from_64: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefillEntry {
    pub min_displayed: f64,
    pub levels: Vec<f64>,
}

/// One styled progression level
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub level: u32,
    pub value: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub layout: Vec<LayoutEntry>,
    pub values: Vec<ValueEntry>,
    pub levels: Vec<LevelEntry>,
    pub picks: Vec<PickEntry>,
    pub draws: Vec<DrawEntry>,
    pub refills: Vec<RefillEntry>,
}

impl ConformanceReport {
    /// Evaluate every rule on the fixed inputs for a board of `board`'s shape
    pub fn build(board: &Board) -> Self {
        Self {
            layout: layout_entries(board),
            values: value_entries(),
            levels: level_entries(),
            picks: pick_entries(),
            draws: draw_entries(),
            refills: refill_entries(),
        }
    }
}

fn layout_entries(board: &Board) -> Vec<LayoutEntry> {
    board
        .cells()
        .iter()
        .map(|cell| {
            let coord = cell.coord();
            LayoutEntry {
                coord,
                s: coord.s(),
                offset: coord.to_offset(),
                pointy: coord.to_pixel(REPORT_HEX_SIZE),
                flat: coord.to_screen(REPORT_HEX_SIZE),
                neighbors: board.neighbors(coord).len(),
            }
        })
        .collect()
}

fn value_entries() -> Vec<ValueEntry> {
    let mut inputs = vec![0.0, 1.0, 2.0, 3.0, 6.0, 1024.0, 1e6, 1_500_000.0, 1e33, MAX_VALUE, MAX_VALUE * 2.0];
    inputs.extend((1..=40).map(|e| 2f64.powi(e * 5)));

    inputs
        .into_iter()
        .map(|value| ValueEntry {
            value,
            valid: is_valid_tile_value(value),
            label: format_value(value),
            level: tile_level(value),
            next: next_value(value),
        })
        .collect()
}

fn level_entries() -> Vec<LevelEntry> {
    (0..LEVEL_COUNT)
        .filter_map(|level| {
            let value = tile_value_for_level(level)?;
            Some(LevelEntry {
                level,
                value,
                label: format_value(value),
            })
        })
        .collect()
}

/// Points on a grid at a quarter-hex pitch, which crosses cell edges and corners
fn pick_entries() -> Vec<PickEntry> {
    let mut picks = Vec::new();
    for i in -8..=8 {
        for j in -8..=8 {
            let (x, y) = (i as f64 * 0.25, j as f64 * 0.25);
            picks.push(PickEntry {
                x,
                y,
                flat: Orientation::FlatTop.pixel_to_hex(x, y, REPORT_HEX_SIZE),
                pointy: Orientation::PointyTop.pixel_to_hex(x, y, REPORT_HEX_SIZE),
            });
        }
    }
    picks
}

fn draw_entries() -> Vec<DrawEntry> {
    REPORT_DRAWS
        .iter()
        .map(|&u| DrawEntry {
            u,
            new_tile: pick_new_tile_value(u),
            initial_tile: pick_initial_tile_value(u),
            refill_from_2: pick_refill_value(2.0, u),
            refill_from_64: pick_refill_value(64.0, u),
        })
        .collect()
}

fn refill_entries() -> Vec<RefillEntry> {
    [0.0, 2.0, 3.0, 64.0, 1e30, 2f64.powi(995), MAX_VALUE]
        .into_iter()
        .map(|min_displayed| RefillEntry {
            min_displayed,
            levels: refill_levels(min_displayed),
        })
        .collect()
}
