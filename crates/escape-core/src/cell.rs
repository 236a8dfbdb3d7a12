//! The [`Cell`] type: what occupies one square of the board.

use std::fmt;

/// Terrain or marker occupying a board square.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    /// Fire or any other hazard; impassable like a wall.
    Hazard,
    Start,
    End,
}

impl Cell {
    /// Every cell kind, in glyph-table order.
    pub const ALL: [Cell; 5] = [Cell::Empty, Cell::Wall, Cell::Hazard, Cell::Start, Cell::End];

    /// Whether a walker may stand on this cell.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Cell::Wall | Cell::Hazard)
    }

    /// Whether this is a Wall or Hazard.
    #[inline]
    pub const fn is_obstacle(self) -> bool {
        !self.is_passable()
    }

    /// Whether this is the Start or End marker.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Cell::Start | Cell::End)
    }

    /// Map glyph used by the ASCII codec.
    pub const fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Hazard => 'F',
            Cell::Start => 'S',
            Cell::End => 'E',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Cell> {
        match ch {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Wall),
            'F' => Some(Cell::Hazard),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cell::Empty => "empty",
            Cell::Wall => "wall",
            Cell::Hazard => "hazard",
            Cell::Start => "start",
            Cell::End => "end",
        };
        f.write_str(name)
    }
}
