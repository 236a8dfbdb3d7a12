use std::fmt;

use crate::cell::Cell;
use crate::geom::Position;

/// Errors raised by [`Grid`](crate::Grid) edits, queries and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The position lies outside `[0, rows) x [0, cols)`.
    OutOfBounds { pos: Position, rows: i32, cols: i32 },
    /// Map lines have inconsistent widths, or the map is empty.
    InconsistentSize(String),
    /// A character outside the glyph table was found in a map.
    InvalidGlyph { ch: char, pos: Position },
    /// A map contains more than one Start or End marker.
    DuplicateEndpoint { cell: Cell, pos: Position },
    /// A cached Start or End position disagrees with the cells.
    EndpointMismatch { cell: Cell, cached: Option<Position> },
    /// The board is too small for the requested operation.
    TooSmall { rows: i32, cols: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, rows, cols } => {
                write!(f, "position {pos} is outside the {rows}x{cols} grid")
            }
            Self::InconsistentSize(s) => write!(f, "grid map: inconsistent size:\n{s}"),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "grid map contains invalid glyph \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateEndpoint { cell, pos } => {
                write!(f, "grid map contains a second {cell} marker at {pos}")
            }
            Self::EndpointMismatch { cell, cached } => match cached {
                Some(pos) => write!(f, "cached {cell} position {pos} does not match the cells"),
                None => write!(f, "grid has a {cell} cell but no cached {cell} position"),
            },
            Self::TooSmall { rows, cols } => {
                write!(f, "a {rows}x{cols} grid cannot hold distinct start and end cells")
            }
        }
    }
}

impl std::error::Error for GridError {}
