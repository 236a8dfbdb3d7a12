//! Random board generation.
//!
//! [`Scatter`] clears a grid, drops a Start and a distinct End at random
//! cells, then sprinkles walls and hazards over the remaining cells with the
//! probabilities given by [`ScatterConfig`].

use rand::Rng;

use crate::cell::Cell;
use crate::error::GridError;
use crate::geom::Position;
use crate::grid::Grid;

/// Obstacle densities used by [`Scatter`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScatterConfig {
    /// Probability that a non-endpoint cell becomes a wall.
    pub wall_ratio: f64,
    /// Probability that a non-endpoint cell becomes a hazard.
    pub hazard_ratio: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            wall_ratio: 0.20,
            hazard_ratio: 0.05,
        }
    }
}

/// Random board generator.
pub struct Scatter<R: Rng> {
    pub rng: R,
    pub config: ScatterConfig,
}

impl<R: Rng> Scatter<R> {
    /// Create a generator with the default densities.
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, ScatterConfig::default())
    }

    pub fn with_config(rng: R, config: ScatterConfig) -> Self {
        Self { rng, config }
    }

    /// Regenerate `grid` in place.
    ///
    /// Fails with [`GridError::TooSmall`] if the board has fewer than two
    /// cells; the grid is left untouched in that case.
    pub fn fill(&mut self, grid: &mut Grid) -> Result<(), GridError> {
        let (rows, cols) = (grid.rows(), grid.cols());
        if grid.len() < 2 {
            return Err(GridError::TooSmall { rows, cols });
        }
        grid.clear();

        let start = self.random_position(rows, cols);
        grid.set(start, Cell::Start)?;

        let mut end = start;
        while end == start {
            end = self.random_position(rows, cols);
        }
        grid.set(end, Cell::End)?;

        let hazard = self.config.hazard_ratio;
        let wall = hazard + self.config.wall_ratio;
        for row in 0..rows {
            for col in 0..cols {
                let p = Position::new(row, col);
                if p == start || p == end {
                    continue;
                }
                let r: f64 = self.rng.random();
                if r < hazard {
                    grid.set(p, Cell::Hazard)?;
                } else if r < wall {
                    grid.set(p, Cell::Wall)?;
                }
            }
        }

        log::debug!(
            "scattered {rows}x{cols} grid: start {start}, end {end}, {} walls, {} hazards",
            grid.count(Cell::Wall),
            grid.count(Cell::Hazard)
        );
        Ok(())
    }

    fn random_position(&mut self, rows: i32, cols: i32) -> Position {
        Position::new(self.rng.random_range(0..rows), self.rng.random_range(0..cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn places_both_endpoints() {
        let mut grid = Grid::default();
        let mut sc = Scatter::new(StdRng::seed_from_u64(7));
        sc.fill(&mut grid).unwrap();
        let (start, end) = (grid.start().unwrap(), grid.end().unwrap());
        assert_ne!(start, end);
        assert_eq!(grid.get(start), Ok(Cell::Start));
        assert_eq!(grid.get(end), Ok(Cell::End));
        assert_eq!(grid.count(Cell::Start), 1);
        assert_eq!(grid.count(Cell::End), 1);
    }

    #[test]
    fn same_seed_same_board() {
        let mut a = Grid::default();
        let mut b = Grid::default();
        Scatter::new(StdRng::seed_from_u64(99)).fill(&mut a).unwrap();
        Scatter::new(StdRng::seed_from_u64(99)).fill(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn densities_are_respected() {
        let mut grid = Grid::with_size(10, 10);
        let none = ScatterConfig {
            wall_ratio: 0.0,
            hazard_ratio: 0.0,
        };
        Scatter::with_config(StdRng::seed_from_u64(1), none)
            .fill(&mut grid)
            .unwrap();
        assert_eq!(grid.count(Cell::Empty), 98);

        let all_walls = ScatterConfig {
            wall_ratio: 1.0,
            hazard_ratio: 0.0,
        };
        Scatter::with_config(StdRng::seed_from_u64(1), all_walls)
            .fill(&mut grid)
            .unwrap();
        assert_eq!(grid.count(Cell::Wall), 98);
    }

    #[test]
    fn single_cell_board_is_too_small() {
        let mut grid = Grid::with_size(1, 1);
        let err = Scatter::new(StdRng::seed_from_u64(3)).fill(&mut grid);
        assert_eq!(err, Err(GridError::TooSmall { rows: 1, cols: 1 }));
    }

    #[test]
    fn two_cell_board_uses_both_cells() {
        let mut grid = Grid::with_size(1, 2);
        Scatter::new(StdRng::seed_from_u64(5)).fill(&mut grid).unwrap();
        assert_eq!(grid.count(Cell::Empty), 0);
    }
}
