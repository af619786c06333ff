//! Board topology: a fixed diamond of cells
//!
//! Row `r` of a board with radius `R` holds `R + 1 - |r|` cells, centred
//! horizontally. Cells are kept in build order (by `r`, then `q`) and the
//! coordinate set never changes until the board is re-initialized.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::cell::Cell;
use crate::error::{CoreError, Result};
use crate::hex::{Direction, HexCoord, Orientation};
use crate::value::random_initial_tile_value;

/// Grid radius used by both front-ends
pub const GRID_RADIUS: i32 = 4;

/// Coordinates of a diamond board in build order.
///
/// Rows are centred on the pointy-top pixel axis (`x = 0`), not on `q = 0`:
/// row `r` starts at `q = floor(-(r + width - 1) / 2)`, so the top row of a
/// radius-4 board is the single cell `(2, -4)`.
pub fn diamond_layout(radius: i32) -> Vec<HexCoord> {
    let mut coords = Vec::new();
    for r in -radius..=radius {
        let width = radius + 1 - r.abs();
        let q_start = (-(r + width - 1)).div_euclid(2);
        for q in q_start..q_start + width {
            coords.push(HexCoord::new(q, r));
        }
    }
    coords
}

pub struct Board {
    radius: i32,
    cells: Vec<Cell>,
    /// coord -> position in `cells`
    index: FxHashMap<HexCoord, usize>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    pub fn new(radius: i32) -> Result<Self> {
        if radius < 0 {
            return Err(CoreError::InvalidRadius(radius));
        }
        Ok(Self::build(radius))
    }

    fn build(radius: i32) -> Self {
        let mut board = Self {
            radius,
            cells: Vec::new(),
            index: FxHashMap::default(),
        };
        board.initialize();
        board
    }

    /// Drop all cells (values, crowns and subscribers) and rebuild the layout
    pub fn initialize(&mut self) {
        self.cells.clear();
        self.index.clear();

        for coord in diamond_layout(self.radius) {
            self.index.insert(coord, self.cells.len());
            self.cells.push(Cell::new(coord));
        }

        tracing::debug!(radius = self.radius, cells = self.cells.len(), "board initialized");
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.index.contains_key(&coord)
    }

    /// Cell at `coord`, or `None` off the board
    pub fn cell(&self, coord: HexCoord) -> Option<&Cell> {
        self.index.get(&coord).map(|&i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, coord: HexCoord) -> Option<&mut Cell> {
        match self.index.get(&coord) {
            Some(&i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// All cells in build order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// On-board neighbors of `coord` in direction order. Any coordinate is
    /// accepted, including ones at the edge of the `i32` range.
    pub fn neighbors(&self, coord: HexCoord) -> Vec<&Cell> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| coord.checked_neighbor(dir))
            .filter_map(|n| self.cell(n))
            .collect()
    }

    /// Empty cells in build order
    pub fn empty_cells(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|c| c.is_empty()).collect()
    }

    /// Cell holding the largest value; the first in build order wins ties
    pub fn highest_value_cell(&self) -> Option<&Cell> {
        let mut best: Option<&Cell> = None;
        let mut max = 0.0;
        for cell in &self.cells {
            if cell.value() > max {
                max = cell.value();
                best = Some(cell);
            }
        }
        best
    }

    /// Smallest value currently on the board
    pub fn lowest_value(&self) -> Option<f64> {
        self.cells
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| c.value())
            .reduce(f64::min)
    }

    // ========================================================================
    // STATE PREDICATES
    // ========================================================================

    /// Whether any occupied cell touches a neighbor with the same value
    pub fn has_valid_merge(&self) -> bool {
        self.cells
            .iter()
            .filter(|c| !c.is_empty())
            .any(|cell| {
                self.neighbors(cell.coord())
                    .into_iter()
                    .any(|other| other.value() == cell.value())
            })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Set the value at `coord`. Returns whether the cell changed.
    pub fn set_value(&mut self, coord: HexCoord, value: f64) -> Result<bool> {
        self.cell_mut(coord)
            .ok_or(CoreError::OffBoard(coord))?
            .set_value(value)
    }

    /// Empty the cell at `coord`. Off-board coordinates are ignored.
    pub fn clear(&mut self, coord: HexCoord) -> bool {
        self.cell_mut(coord).map_or(false, Cell::clear)
    }

    /// Move the crown to the highest-value cell and remove it everywhere else
    pub fn refresh_crowns(&mut self) -> Option<HexCoord> {
        let crowned = self.highest_value_cell().map(Cell::coord);
        for cell in &mut self.cells {
            cell.set_crown(Some(cell.coord()) == crowned);
        }
        tracing::debug!(crown = ?crowned, "crown refreshed");
        crowned
    }

    /// Uniformly chosen empty coordinate
    pub fn random_empty_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<HexCoord> {
        let empty: Vec<HexCoord> = self.empty_cells().iter().map(|c| c.coord()).collect();
        empty.choose(rng).copied()
    }

    /// Fill up to `count` random empty cells from the initial-board distribution
    pub fn seed_initial_tiles<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<HexCoord>> {
        let mut placed = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(coord) = self.random_empty_coord(rng) else {
                break;
            };
            let value = random_initial_tile_value(rng);
            self.set_value(coord, value)?;
            placed.push(coord);
        }
        tracing::debug!(placed = placed.len(), requested = count, "seeded initial tiles");
        Ok(placed)
    }

    // ========================================================================
    // INPUT MAPPING
    // ========================================================================

    /// Cell under a pixel position, if the position lands on the board
    pub fn cell_at_pixel(
        &self,
        orientation: Orientation,
        x: f64,
        y: f64,
        hex_size: f64,
    ) -> Option<&Cell> {
        self.cell(orientation.pixel_to_hex(x, y, hex_size)?)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::build(GRID_RADIUS)
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("radius", &self.radius)
            .field("cells", &self.cells)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fill_distinct(board: &mut Board) {
        let coords: Vec<HexCoord> = board.cells().iter().map(Cell::coord).collect();
        for (i, coord) in coords.into_iter().enumerate() {
            board.set_value(coord, 2f64.powi(i as i32 + 1)).unwrap();
        }
    }

    #[test]
    fn test_default_layout() {
        let board = Board::default();
        assert_eq!(board.radius(), GRID_RADIUS);
        assert_eq!(board.cell_count(), 25);

        let widths: Vec<usize> = (-4..=4)
            .map(|r| board.cells().iter().filter(|c| c.coord().r == r).count())
            .collect();
        assert_eq!(widths, vec![1, 2, 3, 4, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_layout_is_rhombus() {
        let board = Board::default();
        for cell in board.cells() {
            let c = cell.coord();
            assert!((-2..=2).contains(&c.q), "{}", c);
            assert!((-2..=2).contains(&(c.q + c.r)), "{}", c);
        }
    }

    #[test]
    fn test_rows_centred() {
        let board = Board::default();
        for r in -4..=4 {
            let sum: f64 = board
                .cells()
                .iter()
                .filter(|c| c.coord().r == r)
                .map(|c| c.coord().to_pixel(1.0).0)
                .sum();
            assert!(sum.abs() < 1e-9, "row {} not centred", r);
        }
    }

    #[test]
    fn test_build_order() {
        let board = Board::default();
        let coords: Vec<HexCoord> = board.cells().iter().map(Cell::coord).collect();
        assert_eq!(coords[0], HexCoord::new(2, -4));
        assert_eq!(coords[1], HexCoord::new(1, -3));
        assert_eq!(coords[2], HexCoord::new(2, -3));
        assert_eq!(coords[24], HexCoord::new(-2, 4));
        let mut sorted = coords.clone();
        sorted.sort_by_key(|c| (c.r, c.q));
        assert_eq!(coords, sorted);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut board = Board::default();
        let before: Vec<HexCoord> = board.cells().iter().map(Cell::coord).collect();
        board.set_value(HexCoord::ORIGIN, 8.0).unwrap();
        board.initialize();
        board.initialize();
        let after: Vec<HexCoord> = board.cells().iter().map(Cell::coord).collect();
        assert_eq!(before, after);
        assert_eq!(board.empty_cells().len(), 25);
    }

    #[test]
    fn test_other_radii() {
        assert_eq!(Board::new(0).unwrap().cell_count(), 1);
        assert_eq!(Board::new(1).unwrap().cell_count(), 4);
        assert_eq!(Board::new(3).unwrap().cell_count(), 16);
        assert_eq!(Board::new(-1).unwrap_err(), CoreError::InvalidRadius(-1));
    }

    #[test]
    fn test_off_board_lookups() {
        let mut board = Board::default();
        assert!(board.cell(HexCoord::new(3, 0)).is_none());
        assert!(board.cell(HexCoord::new(0, 5)).is_none());
        assert!(!board.contains(HexCoord::new(-3, 0)));
        assert!(!board.clear(HexCoord::new(9, 9)));
        assert_eq!(
            board.set_value(HexCoord::new(9, 9), 2.0),
            Err(CoreError::OffBoard(HexCoord::new(9, 9)))
        );
    }

    #[test]
    fn test_neighbors_filtered() {
        let board = Board::default();
        assert_eq!(board.neighbors(HexCoord::ORIGIN).len(), 6);

        let corner: Vec<HexCoord> = board
            .neighbors(HexCoord::new(2, -4))
            .iter()
            .map(|c| c.coord())
            .collect();
        assert_eq!(corner, vec![HexCoord::new(2, -3), HexCoord::new(1, -3)]);

        assert!(board.neighbors(HexCoord::new(10, 10)).is_empty());
    }

    #[test]
    fn test_neighbors_at_range_limits() {
        let board = Board::default();
        for coord in [
            HexCoord::new(i32::MAX, 0),
            HexCoord::new(i32::MIN, 0),
            HexCoord::new(0, i32::MAX),
            HexCoord::new(i32::MIN, i32::MIN),
        ] {
            assert!(board.neighbors(coord).is_empty());
            assert!(board.cell(coord).is_none());
        }
    }

    #[test]
    fn test_full_and_empty() {
        let mut board = Board::default();
        assert!(!board.is_full());
        assert_eq!(board.empty_cells().len(), 25);

        fill_distinct(&mut board);
        assert!(board.is_full());
        assert!(board.empty_cells().is_empty());

        board.clear(HexCoord::ORIGIN);
        assert!(!board.is_full());
        assert_eq!(board.empty_cells()[0].coord(), HexCoord::ORIGIN);
    }

    #[test]
    fn test_has_valid_merge() {
        let mut board = Board::default();
        assert!(!board.has_valid_merge());

        board.set_value(HexCoord::ORIGIN, 4.0).unwrap();
        assert!(!board.has_valid_merge());
        board.set_value(HexCoord::new(1, 0), 4.0).unwrap();
        assert!(board.has_valid_merge());

        let mut full = Board::default();
        fill_distinct(&mut full);
        assert!(!full.has_valid_merge());
    }

    #[test]
    fn test_non_adjacent_pair_is_not_a_merge() {
        let mut board = Board::default();
        board.set_value(HexCoord::new(-2, 0), 8.0).unwrap();
        board.set_value(HexCoord::new(2, 0), 8.0).unwrap();
        assert!(!board.has_valid_merge());
    }

    #[test]
    fn test_highest_value_cell() {
        let mut board = Board::default();
        assert!(board.highest_value_cell().is_none());

        board.set_value(HexCoord::new(0, 2), 64.0).unwrap();
        board.set_value(HexCoord::new(1, -2), 64.0).unwrap();
        board.set_value(HexCoord::new(0, 0), 16.0).unwrap();

        // (1, -2) comes first in build order
        let best = board.highest_value_cell().unwrap();
        assert_eq!(best.coord(), HexCoord::new(1, -2));
        assert_eq!(board.lowest_value(), Some(16.0));
    }

    #[test]
    fn test_refresh_crowns() {
        let mut board = Board::default();
        assert_eq!(board.refresh_crowns(), None);

        board.set_value(HexCoord::new(-1, 1), 32.0).unwrap();
        board.set_value(HexCoord::new(1, 1), 8.0).unwrap();
        assert_eq!(board.refresh_crowns(), Some(HexCoord::new(-1, 1)));

        board.set_value(HexCoord::new(1, 1), 128.0).unwrap();
        board.refresh_crowns();
        let crowned: Vec<HexCoord> = board
            .cells()
            .iter()
            .filter(|c| c.has_crown())
            .map(Cell::coord)
            .collect();
        assert_eq!(crowned, vec![HexCoord::new(1, 1)]);
    }

    #[test]
    fn test_seed_initial_tiles() {
        let mut board = Board::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let placed = board.seed_initial_tiles(6, &mut rng).unwrap();
        assert_eq!(placed.len(), 6);
        assert_eq!(board.empty_cells().len(), 19);
        for coord in placed {
            let v = board.cell(coord).unwrap().value();
            assert!([2.0, 4.0, 8.0, 16.0].contains(&v));
        }

        let placed = board.seed_initial_tiles(100, &mut rng).unwrap();
        assert_eq!(placed.len(), 19);
        assert!(board.is_full());
        assert!(board.random_empty_coord(&mut rng).is_none());
    }

    #[test]
    fn test_cell_at_pixel() {
        let board = Board::default();
        for cell in board.cells() {
            let (x, y) = cell.coord().to_screen(32.0);
            let hit = board.cell_at_pixel(Orientation::FlatTop, x + 3.0, y - 2.0, 32.0);
            assert_eq!(hit.map(Cell::coord), Some(cell.coord()));
        }
        let (x, y) = HexCoord::new(3, 0).to_screen(32.0);
        assert!(board.cell_at_pixel(Orientation::FlatTop, x, y, 32.0).is_none());
    }

    #[test]
    fn test_cell_at_pixel_ignores_garbage() {
        let board = Board::default();
        for orientation in [Orientation::FlatTop, Orientation::PointyTop] {
            assert!(board.cell_at_pixel(orientation, f64::NAN, f64::NAN, 40.0).is_none());
            assert!(board.cell_at_pixel(orientation, 0.0, f64::INFINITY, 40.0).is_none());
            assert!(board.cell_at_pixel(orientation, 0.0, 0.0, f64::NAN).is_none());
            assert!(board.cell_at_pixel(orientation, 0.0, 0.0, 0.0).is_none());
            assert!(board.cell_at_pixel(orientation, 1e300, -1e300, 40.0).is_none());
        }
    }
}
