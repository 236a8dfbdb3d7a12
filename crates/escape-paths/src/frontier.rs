use std::collections::BinaryHeap;

use escape_core::Position;

/// Frontier entry, ordered by `(f, h, pos)` for use in `BinaryHeap`.
///
/// `g` is carried along so that a popped entry can be checked against the
/// current best cost: entries superseded by a cheaper rediscovery are stale.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) f: u32,
    pub(crate) h: u32,
    pub(crate) g: u32,
    pub(crate) pos: Position,
}

impl OpenEntry {
    #[inline]
    fn key(&self) -> (u32, u32, Position, u32) {
        (self.f, self.h, self.pos, self.g)
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f, then smallest h.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-ordered open list with lazy deletion.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<OpenEntry>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn push(&mut self, entry: OpenEntry) {
        self.heap.push(entry);
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }

    /// Number of entries held, stale ones included.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(f: u32, h: u32, row: i32, col: i32) -> OpenEntry {
        OpenEntry {
            f,
            h,
            g: f - h,
            pos: Position::new(row, col),
        }
    }

    #[test]
    fn pops_lowest_f_first() {
        let mut fr = Frontier::new();
        fr.push(entry(6, 2, 0, 0));
        fr.push(entry(4, 4, 0, 1));
        fr.push(entry(5, 1, 0, 2));
        let order: Vec<u32> = std::iter::from_fn(|| fr.pop()).map(|e| e.f).collect();
        assert_eq!(order, vec![4, 5, 6]);
    }

    #[test]
    fn ties_on_f_prefer_smaller_h() {
        let mut fr = Frontier::new();
        fr.push(entry(6, 5, 0, 0));
        fr.push(entry(6, 1, 3, 3));
        fr.push(entry(6, 3, 1, 1));
        let hs: Vec<u32> = std::iter::from_fn(|| fr.pop()).map(|e| e.h).collect();
        assert_eq!(hs, vec![1, 3, 5]);
    }

    #[test]
    fn full_ties_fall_back_to_row_major_position() {
        let mut fr = Frontier::new();
        fr.push(entry(4, 2, 2, 0));
        fr.push(entry(4, 2, 0, 2));
        fr.push(entry(4, 2, 1, 1));
        assert_eq!(fr.len(), 3);
        let ps: Vec<Position> = std::iter::from_fn(|| fr.pop()).map(|e| e.pos).collect();
        assert_eq!(
            ps,
            vec![Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)]
        );
    }
}
