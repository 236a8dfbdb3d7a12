use std::collections::VecDeque;

use escape_core::{Grid, Position};

/// Sentinel meaning "not reached" in the BFS distance map.
const UNREACHED: u32 = u32::MAX;

/// Length in steps of the shortest walk from `from` to `to`, found by plain
/// breadth-first search with the same passability rules as the A* engine.
///
/// Returns `None` if either position is off the board or impassable, or if
/// `to` cannot be reached.
pub fn shortest_distance(grid: &Grid, from: Position, to: Position) -> Option<u32> {
    if !grid.is_passable(from) || !grid.is_passable(to) {
        return None;
    }

    let cols = grid.cols() as usize;
    let idx = |p: Position| (p.row as usize) * cols + (p.col as usize);
    let mut dist = vec![UNREACHED; grid.len()];
    let mut queue = VecDeque::new();

    dist[idx(from)] = 0;
    queue.push_back(from);

    while let Some(cp) = queue.pop_front() {
        let cd = dist[idx(cp)];
        if cp == to {
            return Some(cd);
        }
        for np in grid.neighbors4(cp) {
            if !grid.is_passable(np) || dist[idx(np)] != UNREACHED {
                continue;
            }
            dist[idx(np)] = cd + 1;
            queue.push_back(np);
        }
    }
    None
}
