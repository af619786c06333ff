//! GameConfig - board and layout settings shared with a front-end

use crate::board::{Board, GRID_RADIUS};
use crate::error::CoreError;
use crate::hex::Orientation;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default hex radius in pixels
pub const DEFAULT_HEX_SIZE: f64 = 40.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Diamond radius (4 gives the 25-cell board)
    pub grid_radius: i32,
    /// Hex radius in pixels for coordinate conversion
    pub hex_size: f64,
    /// Which pixel mapping the front-end uses
    pub orientation: Orientation,
    /// Seed for reproducible tile generation (None = entropy)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_radius: GRID_RADIUS,
            hex_size: DEFAULT_HEX_SIZE,
            orientation: Orientation::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.grid_radius < 0 {
            return Err(CoreError::InvalidRadius(self.grid_radius));
        }
        if !self.hex_size.is_finite() || self.hex_size <= 0.0 {
            return Err(CoreError::InvalidHexSize(self.hex_size));
        }
        Ok(())
    }

    /// Build an empty board for this configuration
    pub fn board(&self) -> Result<Board, CoreError> {
        self.validate()?;
        Board::new(self.grid_radius)
    }

    /// Load from JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
