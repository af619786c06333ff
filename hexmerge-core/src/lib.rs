//! HexMerge Core - Rules engine for the hex tile-merging puzzle
//!
//! This crate provides the rules shared by every front-end:
//! - Hex geometry (axial coordinates, offset and pixel conversions)
//! - Board topology (fixed diamond of cells, merge and game-over checks)
//! - Cells with change notification
//! - Tile values (validity, progression, generation, labels)
//! - A conformance report for diffing implementations

pub mod hex;
pub mod board;
pub mod cell;
pub mod value;
pub mod sampler;
pub mod config;
pub mod conformance;
pub mod error;

// Re-exports for convenient access
pub use hex::{cube_round, Direction, HexCoord, Orientation, DIRECTIONS};
pub use board::{diamond_layout, Board, GRID_RADIUS};
pub use cell::{Cell, SubscriptionId, ValueChange};
pub use value::{
    format_value, is_valid_tile_value, next_value, random_initial_tile_value,
    random_new_tile_value, random_refill_value, tile_level, MAX_VALUE, MIN_VALUE,
};
pub use sampler::Categorical;
pub use config::GameConfig;
pub use conformance::ConformanceReport;
pub use error::CoreError;
