//! Error types for board and value operations

use crate::hex::HexCoord;

/// Errors raised by mutating operations. Queries never fail; they return
/// `None` or an empty result instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("invalid tile value: {0}")]
    InvalidTileValue(f64),

    #[error("coordinate {0} is not on the board")]
    OffBoard(HexCoord),

    #[error("invalid grid radius: {0}")]
    InvalidRadius(i32),

    #[error("invalid hex size: {0}")]
    InvalidHexSize(f64),
}

pub type Result<T> = std::result::Result<T, CoreError>;
