use escape_core::Position;

/// Manhattan (L1) distance between two positions.
///
/// With unit step costs and no diagonal moves this never overestimates the
/// true walking distance, so it is an admissible A* heuristic.
#[inline]
pub fn manhattan(a: Position, b: Position) -> u32 {
    a.manhattan(b)
}
