//! Board coordinates: [`Position`].
//!
//! Rows grow downwards and columns grow to the right, so `(0, 0)` is the
//! top-left cell of the board.

use std::fmt;

/// A `(row, col)` board coordinate.
///
/// Positions are plain values: equality, ordering and hashing all go through
/// the two coordinates. Ordering is row-major, which is also the order used to
/// break the last tie in the search frontier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Orthogonal step offsets in neighbor order: up, down, left, right.
    pub const STEPS: [Position; 4] = [
        Position::new(-1, 0),
        Position::new(1, 0),
        Position::new(0, -1),
        Position::new(0, 1),
    ];

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by `(drow, dcol)`.
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Component-wise sum, or `None` if either coordinate overflows.
    #[inline]
    pub fn checked_add(self, rhs: Position) -> Option<Position> {
        Some(Self {
            row: self.row.checked_add(rhs.row)?,
            col: self.col.checked_add(rhs.col)?,
        })
    }

    /// Manhattan (L1) distance to `other`, saturating at `u32::MAX`.
    #[inline]
    pub fn manhattan(self, other: Position) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn step_order_is_up_down_left_right() {
        let p = Position::new(3, 3);
        let around: Vec<Position> = Position::STEPS
            .iter()
            .filter_map(|&d| p.checked_add(d))
            .collect();
        assert_eq!(
            around,
            vec![
                Position::new(2, 3),
                Position::new(4, 3),
                Position::new(3, 2),
                Position::new(3, 4),
            ]
        );
    }

    #[test]
    fn checked_add_refuses_to_wrap() {
        assert_eq!(Position::new(i32::MAX, 0).checked_add(Position::new(1, 0)), None);
        assert_eq!(Position::new(0, i32::MIN).checked_add(Position::new(0, -1)), None);
        assert_eq!(
            Position::new(i32::MIN, 0).checked_add(Position::new(1, 0)),
            Some(Position::new(i32::MIN + 1, 0))
        );
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Position::new(0, 0);
        let b = Position::new(2, -3);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(b.manhattan(a), 5);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn manhattan_saturates_on_extreme_coordinates() {
        let a = Position::new(i32::MIN, i32::MIN);
        let b = Position::new(i32::MAX, i32::MAX);
        assert_eq!(a.manhattan(b), u32::MAX);
    }

    #[test]
    fn ordering_is_row_major() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(1, 0) < Position::new(1, 1));
    }

    #[test]
    fn hashing_is_by_value() {
        let mut set = HashSet::new();
        set.insert(Position::new(1, 2));
        assert!(set.contains(&Position::from((1, 2))));
        assert!(!set.contains(&Position::new(2, 1)));
    }

    #[test]
    fn display_format() {
        assert_eq!(Position::new(4, 7).to_string(), "(4, 7)");
    }
}
