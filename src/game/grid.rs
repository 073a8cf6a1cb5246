//! Playfield bounds.
//!
//! A [`Grid`] is nothing more than a column and row count. Both are clamped to
//! at least 1 on construction so that random placement and bounds checks are
//! always well defined, even when the caller derived the size from a
//! zero-sized viewport.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cols: usize,
    rows: usize,
}

impl Grid {
    /// Create a grid, clamping degenerate dimensions to 1
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// (cols, rows), both >= 1
    pub fn bounds(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// True iff 0 <= x < cols and 0 <= y < rows
    pub fn is_inside(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.cols && (pos.y as usize) < self.rows
    }

    /// Draw a uniformly random cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let x = rng.gen_range(0..self.cols) as i32;
        let y = rng.gen_range(0..self.rows) as i32;
        Position::new(x, y)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows)
            .flat_map(move |y| (0..self.cols).map(move |x| Position::new(x as i32, y as i32)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_degenerate_dimensions_clamped() {
        assert_eq!(Grid::new(0, 0).bounds(), (1, 1));
        assert_eq!(Grid::new(0, 7).bounds(), (1, 7));
        assert_eq!(Grid::new(12, 0).bounds(), (12, 1));
        assert_eq!(Grid::new(30, 20).bounds(), (30, 20));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 10);

        assert!(grid.is_inside(Position::new(0, 0)));
        assert!(grid.is_inside(Position::new(19, 9)));
        assert!(!grid.is_inside(Position::new(-1, 0)));
        assert!(!grid.is_inside(Position::new(0, -1)));
        assert!(!grid.is_inside(Position::new(20, 0)));
        assert!(!grid.is_inside(Position::new(0, 10)));
    }

    #[test]
    fn test_random_cell_stays_inside() {
        let grid = Grid::new(7, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            assert!(grid.is_inside(grid.random_cell(&mut rng)));
        }
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = Grid::new(0, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(grid.random_cell(&mut rng), Position::new(0, 0));
        assert_eq!(grid.cells().collect::<Vec<_>>(), vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_cells_row_major() {
        let grid = Grid::new(3, 2);
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[2], Position::new(2, 0));
        assert_eq!(cells[3], Position::new(0, 1));
        assert_eq!(cells[5], Position::new(2, 1));
    }
}
