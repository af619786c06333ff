//! Hex geometry with axial coordinates
//!
//! Coordinates are stored as axial `(q, r)`; the cube component `s = -q - r`
//! is always derived. Two pixel layouts are supported:
//! - pointy-top (native front-end world space)
//! - flat-top (canvas front-end screen space)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Axial hex coordinates
///
/// `+`, `-`, `s()` and the offset conversions use plain `i32` arithmetic and
/// expect components well inside the `i32` range. `checked_neighbor` and
/// `distance` accept any coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

/// The six neighbor directions, clockwise from north-east
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

/// Direction vectors in axial coordinates (dq, dr)
/// Index: 0=NE, 1=E, 2=SE, 3=SW, 4=W, 5=NW
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, -1),  // NE
    (1, 0),   // E
    (0, 1),   // SE
    (-1, 1),  // SW
    (-1, 0),  // W
    (0, -1),  // NW
];

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Axial offset for this direction
    pub const fn offset(self) -> HexCoord {
        let (dq, dr) = DIRECTIONS[self as usize];
        HexCoord::new(dq, dr)
    }

    pub const fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 3) % 6]
    }
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Derived cube component
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    pub fn neighbor(&self, direction: Direction) -> HexCoord {
        *self + direction.offset()
    }

    /// Neighbor in `direction`, or `None` when it falls outside the `i32` range
    pub fn checked_neighbor(&self, direction: Direction) -> Option<HexCoord> {
        let (dq, dr) = DIRECTIONS[direction as usize];
        Some(HexCoord::new(self.q.checked_add(dq)?, self.r.checked_add(dr)?))
    }

    /// All six neighbors in `Direction::ALL` order. Not filtered by board membership.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        Direction::ALL.map(|dir| self.neighbor(dir))
    }

    /// Cube distance between two hexes
    pub fn distance(&self, other: HexCoord) -> u64 {
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        (dq.unsigned_abs() + dr.unsigned_abs() + (dq + dr).unsigned_abs()) / 2
    }

    /// Convert to odd-r offset layout as `(col, row)`
    pub fn to_offset(&self) -> (i32, i32) {
        let col = self.q + (self.r - (self.r & 1)) / 2;
        (col, self.r)
    }

    /// Inverse of [`HexCoord::to_offset`]
    pub fn from_offset(col: i32, row: i32) -> Self {
        let q = col - (row - (row & 1)) / 2;
        Self::new(q, row)
    }

    /// Pointy-top world-space centre of this hex
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let (q, r) = (self.q as f64, self.r as f64);
        let x = hex_size * (SQRT_3 * q + SQRT_3 / 2.0 * r);
        let y = hex_size * (1.5 * r);
        (x, y)
    }

    /// Inverse of [`HexCoord::to_pixel`]
    ///
    /// `None` for non-finite positions or a size that is not positive and finite.
    pub fn from_pixel(x: f64, y: f64, hex_size: f64) -> Option<Self> {
        if !usable_size(hex_size) {
            return None;
        }
        let q = (SQRT_3 / 3.0 * x - y / 3.0) / hex_size;
        let r = (2.0 / 3.0 * y) / hex_size;
        cube_round(q, r)
    }

    /// Flat-top screen-space centre of this hex
    pub fn to_screen(&self, hex_size: f64) -> (f64, f64) {
        let (q, r) = (self.q as f64, self.r as f64);
        let x = hex_size * 1.5 * q;
        let y = hex_size * SQRT_3 * (r + q / 2.0);
        (x, y)
    }

    /// Inverse of [`HexCoord::to_screen`]: the hex containing a screen position
    pub fn pixel_to_hex(px: f64, py: f64, hex_size: f64) -> Option<Self> {
        if !usable_size(hex_size) {
            return None;
        }
        let q = (2.0 / 3.0 * px) / hex_size;
        let r = (-px / 3.0 + SQRT_3 / 3.0 * py) / hex_size;
        cube_round(q, r)
    }
}

/// Snap fractional axial coordinates to the nearest lattice point.
///
/// Each cube component is rounded on its own; the one that moved the most is
/// then rebuilt from the other two. When q and r tie for the largest delta,
/// r is rebuilt. When s moved the most nothing is stored for it, so the
/// rounded q and r stand.
///
/// Returns `None` for non-finite input or a result outside the `i32` range.
pub fn cube_round(q: f64, r: f64) -> Option<HexCoord> {
    if !q.is_finite() || !r.is_finite() {
        return None;
    }
    let s = -q - r;

    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();

    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }

    Some(HexCoord::new(to_axis(rq)?, to_axis(rr)?))
}

fn to_axis(rounded: f64) -> Option<i32> {
    (rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX)).then_some(rounded as i32)
}

fn usable_size(hex_size: f64) -> bool {
    hex_size.is_finite() && hex_size > 0.0
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;

    fn sub(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Hex orientation used by a front-end
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Native front-end world space
    PointyTop,
    /// Canvas front-end screen space
    #[default]
    FlatTop,
}

impl Orientation {
    pub fn hex_to_pixel(self, hex: HexCoord, hex_size: f64) -> (f64, f64) {
        match self {
            Orientation::PointyTop => hex.to_pixel(hex_size),
            Orientation::FlatTop => hex.to_screen(hex_size),
        }
    }

    pub fn pixel_to_hex(self, x: f64, y: f64, hex_size: f64) -> Option<HexCoord> {
        match self {
            Orientation::PointyTop => HexCoord::from_pixel(x, y, hex_size),
            Orientation::FlatTop => HexCoord::pixel_to_hex(x, y, hex_size),
        }
    }
}
