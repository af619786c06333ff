//! Tile value rules
//!
//! Tile values are powers of two stored as `f64` so they can grow far past
//! the integer range. This module decides which values are legal, how a value
//! advances on merge, how new values are generated and how any value is
//! abbreviated to a short label.

use crate::sampler::Categorical;
use rand::Rng;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest tile value
pub const MIN_VALUE: f64 = 2.0;

/// Domain ceiling; values never progress past it
pub const MAX_VALUE: f64 = 1e300;

/// Number of progression levels a front-end is expected to style
pub const LEVEL_COUNT: u32 = 100;

/// How far `log2(value)` may sit from an integer and still count as a power of two
pub const POWER_TOLERANCE: f64 = 1e-3;

/// Labels cycle once a value reaches this threshold
pub const WRAP_THRESHOLD: f64 = 1e33;

/// SI-style suffixes, ascending
const SUFFIXES: [(f64, &str); 10] = [
    (1e3, "k"),
    (1e6, "m"),
    (1e9, "g"),
    (1e12, "t"),
    (1e15, "p"),
    (1e18, "e"),
    (1e21, "z"),
    (1e24, "y"),
    (1e27, "r"),
    (1e30, "q"),
];

/// Spawn distribution for normal turns (value, weight)
const NEW_TILE_WEIGHTS: [(f64, f64); 2] = [(2.0, 90.0), (4.0, 10.0)];

/// Spawn distribution for seeding a fresh board (value, weight)
const INITIAL_TILE_WEIGHTS: [(f64, f64); 4] = [(2.0, 50.0), (4.0, 30.0), (8.0, 15.0), (16.0, 5.0)];

/// Refill ceiling as a multiple of the floor
const REFILL_SPAN: f64 = 8.0;

// ============================================================================
// VALIDITY AND PROGRESSION
// ============================================================================

/// A value is a legal tile iff it is a power of two in `[MIN_VALUE, MAX_VALUE]`
pub fn is_valid_tile_value(value: f64) -> bool {
    if !value.is_finite() || value < MIN_VALUE || value > MAX_VALUE {
        return false;
    }
    let exponent = value.log2();
    (exponent - exponent.round()).abs() < POWER_TOLERANCE
}

/// Value produced by merging two tiles of `value`; saturates at `MAX_VALUE`
pub fn next_value(value: f64) -> f64 {
    (value * 2.0).min(MAX_VALUE)
}

/// Zero-based progression level: 2 -> 0, 4 -> 1, 65536 -> 15
pub fn tile_level(value: f64) -> u32 {
    if value >= MIN_VALUE {
        (value.log2().round() as u32).saturating_sub(1)
    } else {
        0
    }
}

/// Inverse of [`tile_level`]. `None` when the level would exceed `MAX_VALUE`.
pub fn tile_value_for_level(level: u32) -> Option<f64> {
    let exponent = i32::try_from(level).ok()?.checked_add(1)?;
    let value = 2f64.powi(exponent);
    (value <= MAX_VALUE).then_some(value)
}

/// Greatest valid tile value (2^996)
pub fn largest_tile_value() -> f64 {
    2f64.powi(MAX_VALUE.log2().floor() as i32)
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Abbreviate a value to a short label.
///
/// Values at or above `WRAP_THRESHOLD` are divided down until they fall below
/// it, so labels cycle instead of needing new suffixes. The largest suffix
/// whose threshold fits is applied and the mantissa is rounded to the
/// nearest integer.
pub fn format_value(value: f64) -> String {
    if value.is_nan() || value <= 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return "\u{221e}".to_string();
    }

    let mut label = value;
    while label >= WRAP_THRESHOLD {
        label /= WRAP_THRESHOLD;
    }

    for &(threshold, suffix) in SUFFIXES.iter().rev() {
        if label >= threshold {
            return format!("{}{}", (label / threshold).round() as u64, suffix);
        }
    }

    format!("{}", label.round() as u64)
}

// ============================================================================
// GENERATION
// ============================================================================

/// Value for a normal spawn: 90% 2, 10% 4
pub fn random_new_tile_value<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    pick_new_tile_value(rng.gen())
}

/// Value for seeding a fresh board: 50% 2, 30% 4, 15% 8, 5% 16
pub fn random_initial_tile_value<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    pick_initial_tile_value(rng.gen())
}

/// Value relative to the smallest value currently displayed.
///
/// Candidates are the powers of two from the floor up to eight times
/// `min_displayed` (clamped to `MIN_VALUE`), where a floor that is not a power
/// of two is snapped up; the i-th candidate (1-indexed) has weight `1/i`. With a single
/// candidate the floor is returned and no draw is taken from `rng`.
pub fn random_refill_value<R: Rng + ?Sized>(min_displayed: f64, rng: &mut R) -> f64 {
    let levels = refill_levels(min_displayed);
    if levels.len() <= 1 {
        return refill_floor(min_displayed);
    }
    pick_level(&levels, rng.gen())
}

/// Normal spawn value for a uniform draw `u` in `[0, 1)`
pub fn pick_new_tile_value(u: f64) -> f64 {
    pick_fixed(&NEW_TILE_WEIGHTS, u)
}

/// Initial-board value for a uniform draw `u` in `[0, 1)`
pub fn pick_initial_tile_value(u: f64) -> f64 {
    pick_fixed(&INITIAL_TILE_WEIGHTS, u)
}

/// Refill value for a uniform draw `u` in `[0, 1)`
pub fn pick_refill_value(min_displayed: f64, u: f64) -> f64 {
    let levels = refill_levels(min_displayed);
    if levels.len() <= 1 {
        return refill_floor(min_displayed);
    }
    pick_level(&levels, u)
}

/// Candidate refill values for `min_displayed`, ascending
pub fn refill_levels(min_displayed: f64) -> Vec<f64> {
    let ceiling = (refill_base(min_displayed) * REFILL_SPAN).min(MAX_VALUE);

    let mut levels = Vec::new();
    let mut value = refill_floor(min_displayed);
    while value <= ceiling {
        levels.push(value);
        value *= 2.0;
    }
    levels
}

/// `min_displayed` clamped to `MIN_VALUE`; the ceiling is measured from here
fn refill_base(min_displayed: f64) -> f64 {
    if min_displayed.is_nan() {
        MIN_VALUE
    } else {
        min_displayed.max(MIN_VALUE)
    }
}

/// Clamp to `MIN_VALUE` and snap up to an exact valid power of two
fn refill_floor(min_displayed: f64) -> f64 {
    let largest = largest_tile_value();
    if min_displayed.is_nan() || min_displayed <= MIN_VALUE {
        return MIN_VALUE;
    }
    if min_displayed >= largest {
        return largest;
    }

    let exponent = min_displayed.log2();
    let snapped = if is_valid_tile_value(min_displayed) {
        exponent.round()
    } else {
        exponent.ceil()
    };
    2f64.powi(snapped as i32).min(largest)
}

fn pick_fixed(table: &[(f64, f64)], u: f64) -> f64 {
    Categorical::new(table.iter().copied()).map_or(MIN_VALUE, |sampler| *sampler.pick(u))
}

fn pick_level(levels: &[f64], u: f64) -> f64 {
    let weighted = levels
        .iter()
        .enumerate()
        .map(|(i, &value)| (value, 1.0 / (i + 1) as f64));
    Categorical::new(weighted).map_or(MIN_VALUE, |sampler| *sampler.pick(u))
}
