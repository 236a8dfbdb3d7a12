//! The [`Grid`] type: a fixed-size board of [`Cell`]s.
//!
//! A `Grid` owns its cells together with cached Start and End positions.
//! Every edit goes through [`Grid::set`], which keeps the cache and the cells
//! in agreement: there is at most one Start and one End on the board, placing
//! a new one moves it, and obstacles never overwrite either marker.
//!
//! Grids round-trip through a small ASCII format (see [`Cell::glyph`]):
//!
//! ```text
//! S.#..
//! ..#..
//! ....E
//! ```

use std::fmt;
use std::str::FromStr;

use crate::cell::Cell;
use crate::error::GridError;
use crate::geom::Position;

/// Board dimensions, fixed for the lifetime of a [`Grid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 20, cols: 20 }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows x cols` board with cached endpoints.
///
/// Deserialized grids are rebuilt cell by cell, so a payload whose cell count
/// or cached endpoints disagree with its dimensions is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
    start: Option<Position>,
    end: Option<Position>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl Grid {
    /// Create an empty grid with the configured dimensions.
    pub fn new(config: GridConfig) -> Self {
        let rows = config.rows.max(0);
        let cols = config.cols.max(0);
        Self {
            cells: vec![Cell::Empty; (rows as usize) * (cols as usize)],
            rows,
            cols,
            start: None,
            end: None,
        }
    }

    /// Shorthand for `Grid::new(GridConfig { rows, cols })`.
    pub fn with_size(rows: i32, cols: i32) -> Self {
        Self::new(GridConfig { rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of cells on the board.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `pos` lies inside `[0, rows) x [0, cols)`.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < self.rows && pos.col < self.cols
    }

    /// Current Start position, if one is placed.
    #[inline]
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    /// Current End position, if one is placed.
    #[inline]
    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// The cell at `pos`.
    pub fn get(&self, pos: Position) -> Result<Cell, GridError> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx])
    }

    /// Place `cell` at `pos`.
    ///
    /// Start and End are unique: placing one clears the previous marker of
    /// the same kind back to Empty. Overwriting a marker with anything else
    /// drops it from the cache. A Wall or Hazard aimed at a Start or End cell
    /// is ignored and still returns `Ok`.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), GridError> {
        let idx = self.index(pos)?;
        let current = self.cells[idx];

        if current.is_endpoint() && cell.is_obstacle() {
            log::trace!("ignoring {cell} over {current} at {pos}");
            return Ok(());
        }

        match cell {
            Cell::Start => {
                if let Some(old) = self.start.replace(pos) {
                    self.reset_marker(old, pos);
                }
            }
            Cell::End => {
                if let Some(old) = self.end.replace(pos) {
                    self.reset_marker(old, pos);
                }
            }
            _ => {}
        }

        if current == Cell::Start && cell != Cell::Start {
            self.start = None;
        }
        if current == Cell::End && cell != Cell::End {
            self.end = None;
        }

        self.cells[idx] = cell;
        Ok(())
    }

    /// Whether a walker may stand on `pos`. Positions off the board are not
    /// passable.
    #[inline]
    pub fn is_passable(&self, pos: Position) -> bool {
        self.offset(pos).is_some_and(|i| self.cells[i].is_passable())
    }

    /// The up-to-four orthogonal neighbours of `pos` that lie on the board,
    /// in the fixed order up, down, left, right.
    ///
    /// Passability is not checked here.
    pub fn neighbors4(&self, pos: Position) -> Neighbors4<'_> {
        Neighbors4 {
            grid: self,
            origin: pos,
            next: 0,
        }
    }

    /// Reset every cell to Empty and forget both endpoints.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.start = None;
        self.end = None;
    }

    /// Number of cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Row-major iterator over `(Position, Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            idx: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Index helpers
    // -----------------------------------------------------------------------

    #[inline]
    fn offset(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some((pos.row as usize) * (self.cols as usize) + (pos.col as usize))
        } else {
            None
        }
    }

    #[inline]
    fn index(&self, pos: Position) -> Result<usize, GridError> {
        self.offset(pos).ok_or(GridError::OutOfBounds {
            pos,
            rows: self.rows,
            cols: self.cols,
        })
    }

    #[inline]
    fn position(&self, idx: usize) -> Position {
        let cols = self.cols as usize;
        Position::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Like [`set`](Self::set), but a second Start or End is an error instead
    /// of moving the first one.
    fn place_unique(&mut self, pos: Position, cell: Cell) -> Result<(), GridError> {
        let taken = match cell {
            Cell::Start => self.start.is_some(),
            Cell::End => self.end.is_some(),
            _ => false,
        };
        if taken {
            return Err(GridError::DuplicateEndpoint { cell, pos });
        }
        self.set(pos, cell)
    }

    /// Revert a displaced marker cell to Empty unless it is being re-placed.
    fn reset_marker(&mut self, old: Position, new: Position) {
        if old == new {
            return;
        }
        if let Some(i) = self.offset(old) {
            self.cells[i] = Cell::Empty;
        }
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator returned by [`Grid::neighbors4`].
pub struct Neighbors4<'a> {
    grid: &'a Grid,
    origin: Position,
    next: usize,
}

impl Iterator for Neighbors4<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        while let Some(&step) = Position::STEPS.get(self.next) {
            self.next += 1;
            match self.origin.checked_add(step) {
                Some(p) if self.grid.contains(p) => return Some(p),
                _ => {}
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(Position::STEPS.len() - self.next))
    }
}

/// Iterator over `(Position, Cell)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    idx: usize,
}

impl Iterator for GridIter<'_> {
    type Item = (Position, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let cell = *self.grid.cells.get(self.idx)?;
        let p = self.grid.position(self.idx);
        self.idx += 1;
        Some((p, cell))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.grid.cells.len() - self.idx;
        (n, Some(n))
    }
}

// ---------------------------------------------------------------------------
// ASCII codec
// ---------------------------------------------------------------------------

impl FromStr for Grid {
    type Err = GridError;

    /// Parse a map, one line per row. Leading and trailing whitespace on each
    /// line is ignored, as are blank lines around the map.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if cols == 0 || lines.iter().any(|l| l.chars().count() != cols) {
            return Err(GridError::InconsistentSize(s.to_string()));
        }

        let mut grid = Grid::with_size(lines.len() as i32, cols as i32);
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Position::new(row as i32, col as i32);
                let cell = Cell::from_glyph(ch).ok_or(GridError::InvalidGlyph { ch, pos })?;
                grid.place_unique(pos, cell)?;
            }
        }
        Ok(grid)
    }
}

/// Wire form of a [`Grid`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
    start: Option<Position>,
    end: Option<Position>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let GridRepr {
            cells,
            rows,
            cols,
            start,
            end,
        } = repr;
        let expected = usize::try_from(rows)
            .ok()
            .zip(usize::try_from(cols).ok())
            .and_then(|(r, c)| r.checked_mul(c));
        if expected != Some(cells.len()) {
            return Err(GridError::InconsistentSize(format!(
                "{} cells for a {rows}x{cols} grid",
                cells.len()
            )));
        }

        let mut grid = Grid::with_size(rows, cols);
        for (i, cell) in cells.into_iter().enumerate() {
            let pos = grid.position(i);
            grid.place_unique(pos, cell)?;
        }
        if grid.start != start {
            return Err(GridError::EndpointMismatch {
                cell: Cell::Start,
                cached: start,
            });
        }
        if grid.end != end {
            return Err(GridError::EndpointMismatch {
                cell: Cell::End,
                cached: end,
            });
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        for (i, row) in self.cells.chunks(self.cols as usize).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for c in row {
                write!(f, "{}", c.glyph())?;
            }
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g: Grid = "S.#\n.FE".parse().unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.end(), Some(Position::new(1, 2)));
    }

    #[test]
    fn short_cell_list_is_rejected() {
        let json = r#"{"cells":[],"rows":3,"cols":3,"start":null,"end":null}"#;
        assert!(matches!(
            serde_json::from_str::<Grid>(json),
            Err(e) if e.to_string().contains("0 cells for a 3x3 grid")
        ));
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        let json = r#"{"cells":[],"rows":-2,"cols":3,"start":null,"end":null}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }

    #[test]
    fn stale_endpoint_cache_is_rejected() {
        let json = r#"{"cells":["Empty","Empty"],"rows":1,"cols":2,
            "start":{"row":0,"col":5},"end":null}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());

        let missing = r#"{"cells":["Start","End"],"rows":1,"cols":2,
            "start":null,"end":{"row":0,"col":1}}"#;
        assert!(serde_json::from_str::<Grid>(missing).is_err());
    }

    #[test]
    fn duplicate_start_cells_are_rejected() {
        let json = r#"{"cells":["Start","Start"],"rows":1,"cols":2,
            "start":{"row":0,"col":1},"end":null}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }

    #[test]
    fn config_round_trip() {
        let cfg = GridConfig { rows: 7, cols: 9 };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(serde_json::from_str::<GridConfig>(&json).unwrap(), cfg);
    }
}
