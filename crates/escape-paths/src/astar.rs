//! Resumable A* search.
//!
//! A [`SearchEngine`] is bound to one grid snapshot and one start/end pair.
//! Construction seeds the frontier with the start; every call to
//! [`SearchEngine::step`] then pops and expands exactly one position, so a
//! caller can pace the search (an animation timer, a test loop) and observe
//! each expansion.
//!
//! The frontier is a binary heap keyed by `(f, h, position)`. A cheaper
//! rediscovery of a position already waiting in the heap pushes a fresh entry
//! rather than decreasing the old one; the stale entry is skipped when it
//! surfaces.

use escape_core::{Grid, Position};

use crate::distance::manhattan;
use crate::error::{EndpointProblem, SearchError};
use crate::frontier::{Frontier, OpenEntry};

/// Sentinel cost for positions not reached yet.
pub(crate) const UNREACHED: u32 = u32::MAX;

/// Where a search is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    Running,
    /// The goal was popped; its parent chain is an optimal path.
    Found,
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

impl SearchStatus {
    /// Whether the search has stopped for good.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, SearchStatus::Running)
    }
}

/// Outcome of one [`SearchEngine::step`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepResult {
    /// One position was expanded. `visited` lists the neighbours that joined
    /// the frontier during this step, in up, down, left, right order.
    Advanced {
        expanded: Position,
        visited: Vec<Position>,
    },
    Found,
    Exhausted,
}

impl StepResult {
    /// The terminal status this result reports, or `Running`.
    pub fn status(&self) -> SearchStatus {
        match self {
            StepResult::Advanced { .. } => SearchStatus::Running,
            StepResult::Found => SearchStatus::Found,
            StepResult::Exhausted => SearchStatus::Exhausted,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-cell bookkeeping
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) g: u32,
    pub(crate) parent: Option<Position>,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHED,
            parent: None,
            open: false,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// Step-driven A* search over a borrowed [`Grid`].
///
/// The engine holds a shared borrow of the grid for its whole life, so the
/// board cannot be edited while a search over it exists. Drop the engine to
/// cancel or restart.
#[derive(Debug)]
pub struct SearchEngine<'g> {
    grid: &'g Grid,
    start: Position,
    end: Position,
    pub(crate) nodes: Vec<Node>,
    open: Frontier,
    status: SearchStatus,
    expansions: usize,
}

impl<'g> SearchEngine<'g> {
    /// Bind a search to `grid` between `start` and `end`.
    ///
    /// Fails with [`SearchError::InvalidEndpoints`] if the endpoints are off
    /// the board, identical, or on an impassable cell.
    pub fn new(grid: &'g Grid, start: Position, end: Position) -> Result<Self, SearchError> {
        for p in [start, end] {
            if !grid.contains(p) {
                return Err(EndpointProblem::OutOfBounds(p).into());
            }
        }
        if start == end {
            return Err(EndpointProblem::Identical.into());
        }
        if !grid.is_passable(start) {
            return Err(EndpointProblem::StartBlocked.into());
        }
        if !grid.is_passable(end) {
            return Err(EndpointProblem::EndBlocked.into());
        }

        let mut engine = Self {
            grid,
            start,
            end,
            nodes: vec![Node::default(); grid.len()],
            open: Frontier::new(),
            status: SearchStatus::Running,
            expansions: 0,
        };

        let h = manhattan(start, end);
        let si = engine.idx(start);
        engine.nodes[si].g = 0;
        engine.nodes[si].open = true;
        engine.open.push(OpenEntry {
            f: h,
            h,
            g: 0,
            pos: start,
        });

        log::debug!("search bound: {start} -> {end}, estimate {h}");
        Ok(engine)
    }

    /// Bind a search to the grid's own Start and End markers.
    pub fn from_grid(grid: &'g Grid) -> Result<Self, SearchError> {
        let start = grid.start().ok_or(EndpointProblem::MissingStart)?;
        let end = grid.end().ok_or(EndpointProblem::MissingEnd)?;
        Self::new(grid, start, end)
    }

    /// Advance the search by one expansion.
    ///
    /// Once the search is `Found` or `Exhausted`, further calls return the
    /// same terminal result and change nothing.
    pub fn step(&mut self) -> StepResult {
        match self.status {
            SearchStatus::Found => return StepResult::Found,
            SearchStatus::Exhausted => return StepResult::Exhausted,
            SearchStatus::Running => {}
        }

        let current = loop {
            let Some(entry) = self.open.pop() else {
                self.status = SearchStatus::Exhausted;
                log::debug!(
                    "search {} -> {} exhausted after {} expansions",
                    self.start,
                    self.end,
                    self.expansions
                );
                return StepResult::Exhausted;
            };
            let ci = self.idx(entry.pos);
            // Skip stale entries.
            if self.nodes[ci].g != entry.g {
                continue;
            }
            self.nodes[ci].open = false;
            break entry;
        };

        self.expansions += 1;

        if current.pos == self.end {
            self.status = SearchStatus::Found;
            log::debug!(
                "search {} -> {} found goal at cost {} after {} expansions",
                self.start,
                self.end,
                current.g,
                self.expansions
            );
            return StepResult::Found;
        }

        let grid = self.grid;
        let tentative_g = current.g + 1;
        let mut visited = Vec::new();

        for np in grid.neighbors4(current.pos) {
            if !grid.is_passable(np) {
                continue;
            }
            let ni = self.idx(np);
            let n = &mut self.nodes[ni];
            if tentative_g >= n.g {
                continue;
            }

            n.g = tentative_g;
            n.parent = Some(current.pos);
            let h = manhattan(np, self.end);
            self.open.push(OpenEntry {
                f: tentative_g + h,
                h,
                g: tentative_g,
                pos: np,
            });
            if !n.open {
                n.open = true;
                visited.push(np);
            }
        }

        log::trace!("expanded {} (g = {}), new {:?}", current.pos, current.g, visited);
        StepResult::Advanced {
            expanded: current.pos,
            visited,
        }
    }

    /// Step until the search terminates and return the final status.
    pub fn run(&mut self) -> SearchStatus {
        while !self.status.is_terminal() {
            self.step();
        }
        self.status
    }

    /// Step until the search terminates, collecting every result including
    /// the terminal one.
    pub fn trace(&mut self) -> Vec<StepResult> {
        let mut steps = Vec::new();
        loop {
            let r = self.step();
            let done = r.status().is_terminal();
            steps.push(r);
            if done {
                return steps;
            }
        }
    }

    /// The start → end path. See [`reconstruct`](crate::reconstruct).
    pub fn path(&self) -> Result<Vec<Position>, SearchError> {
        crate::reconstruct(self)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.end
    }

    /// The grid this search reads.
    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// Number of positions popped and expanded so far, goal included.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Best known cost from the start to `pos`, if `pos` has been reached.
    pub fn g_cost(&self, pos: Position) -> Option<u32> {
        let i = self.offset(pos)?;
        let g = self.nodes[i].g;
        (g != UNREACHED).then_some(g)
    }

    /// The position `pos` was reached from on its best known path. The start
    /// has no parent.
    pub fn parent(&self, pos: Position) -> Option<Position> {
        self.offset(pos).and_then(|i| self.nodes[i].parent)
    }

    /// Whether `pos` is waiting in the frontier.
    pub fn is_open(&self, pos: Position) -> bool {
        self.offset(pos).is_some_and(|i| self.nodes[i].open)
    }

    /// Number of distinct positions waiting in the frontier.
    pub fn open_len(&self) -> usize {
        self.nodes.iter().filter(|n| n.open).count()
    }

    /// Number of heap entries, stale ones included.
    pub fn frontier_len(&self) -> usize {
        self.open.len()
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    fn offset(&self, pos: Position) -> Option<usize> {
        self.grid.contains(pos).then(|| self.idx(pos))
    }

    /// Flat index of an in-bounds position.
    #[inline]
    pub(crate) fn idx(&self, pos: Position) -> usize {
        (pos.row as usize) * (self.grid.cols() as usize) + (pos.col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape_core::Cell;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn construction_seeds_the_start() {
        let g = Grid::with_size(5, 5);
        let se = SearchEngine::new(&g, p(0, 0), p(0, 4)).unwrap();
        assert_eq!(se.status(), SearchStatus::Running);
        assert_eq!(se.g_cost(p(0, 0)), Some(0));
        assert_eq!(se.parent(p(0, 0)), None);
        assert!(se.is_open(p(0, 0)));
        assert_eq!(se.open_len(), 1);
        assert_eq!(se.g_cost(p(0, 1)), None);
    }

    #[test]
    fn identical_endpoints_are_rejected() {
        let g = Grid::with_size(3, 3);
        let err = SearchEngine::new(&g, p(1, 1), p(1, 1)).unwrap_err();
        assert_eq!(err, SearchError::InvalidEndpoints(EndpointProblem::Identical));
    }

    #[test]
    fn blocked_or_missing_endpoints_are_rejected() {
        let mut g = Grid::with_size(3, 3);
        g.set(p(0, 0), Cell::Wall).unwrap();
        g.set(p(2, 2), Cell::Hazard).unwrap();
        assert_eq!(
            SearchEngine::new(&g, p(0, 0), p(1, 1)).unwrap_err(),
            SearchError::InvalidEndpoints(EndpointProblem::StartBlocked)
        );
        assert_eq!(
            SearchEngine::new(&g, p(1, 1), p(2, 2)).unwrap_err(),
            SearchError::InvalidEndpoints(EndpointProblem::EndBlocked)
        );
        assert_eq!(
            SearchEngine::new(&g, p(1, 1), p(3, 0)).unwrap_err(),
            SearchError::InvalidEndpoints(EndpointProblem::OutOfBounds(p(3, 0)))
        );
        assert_eq!(
            SearchEngine::from_grid(&g).unwrap_err(),
            SearchError::InvalidEndpoints(EndpointProblem::MissingStart)
        );
        g.set(p(1, 1), Cell::Start).unwrap();
        assert_eq!(
            SearchEngine::from_grid(&g).unwrap_err(),
            SearchError::InvalidEndpoints(EndpointProblem::MissingEnd)
        );
    }

    #[test]
    fn from_grid_uses_markers() {
        let g: Grid = "S..\n...\n..E".parse().unwrap();
        let se = SearchEngine::from_grid(&g).unwrap();
        assert_eq!(se.start(), p(0, 0));
        assert_eq!(se.end(), p(2, 2));
    }

    #[test]
    fn first_step_expands_start() {
        let g = Grid::with_size(5, 5);
        let mut se = SearchEngine::new(&g, p(2, 2), p(2, 4)).unwrap();
        let r = se.step();
        assert_eq!(
            r,
            StepResult::Advanced {
                expanded: p(2, 2),
                visited: vec![p(1, 2), p(3, 2), p(2, 1), p(2, 3)],
            }
        );
        assert!(!se.is_open(p(2, 2)));
        assert_eq!(se.open_len(), 4);
        assert_eq!(se.g_cost(p(2, 3)), Some(1));
        assert_eq!(se.parent(p(2, 3)), Some(p(2, 2)));
    }

    #[test]
    fn straight_line_pops_five_nodes() {
        let g = Grid::with_size(5, 5);
        let mut se = SearchEngine::new(&g, p(0, 0), p(0, 4)).unwrap();
        let steps = se.trace();
        assert_eq!(steps.last(), Some(&StepResult::Found));
        assert!(se.expansions() <= 5);
        let expanded: Vec<Position> = steps
            .iter()
            .filter_map(|s| match s {
                StepResult::Advanced { expanded, .. } => Some(*expanded),
                _ => None,
            })
            .collect();
        assert_eq!(expanded, vec![p(0, 0), p(0, 1), p(0, 2), p(0, 3)]);
    }

    #[test]
    fn obstacles_are_never_visited() {
        let g: Grid = "
            S#.
            .F.
            ..E"
        .parse()
        .unwrap();
        let mut se = SearchEngine::from_grid(&g).unwrap();
        for s in se.trace() {
            if let StepResult::Advanced { visited, .. } = s {
                assert!(visited.iter().all(|&v| g.is_passable(v)));
            }
        }
        assert_eq!(se.g_cost(p(0, 1)), None);
        assert_eq!(se.g_cost(p(1, 1)), None);
    }

    #[test]
    fn enclosed_start_exhausts() {
        let g: Grid = "
            S#.
            #..
            ..E"
        .parse()
        .unwrap();
        let mut se = SearchEngine::from_grid(&g).unwrap();
        assert!(matches!(se.step(), StepResult::Advanced { ref visited, .. } if visited.is_empty()));
        assert_eq!(se.step(), StepResult::Exhausted);
        assert_eq!(se.status(), SearchStatus::Exhausted);
        assert_eq!(se.expansions(), 1);
    }

    #[test]
    fn terminal_step_is_idempotent() {
        let g = Grid::with_size(3, 3);
        let mut se = SearchEngine::new(&g, p(0, 0), p(2, 2)).unwrap();
        assert_eq!(se.run(), SearchStatus::Found);
        let expansions = se.expansions();
        let frontier = se.frontier_len();
        let costs: Vec<Option<u32>> = g.iter().map(|(q, _)| se.g_cost(q)).collect();
        for _ in 0..5 {
            assert_eq!(se.step(), StepResult::Found);
        }
        assert_eq!(se.expansions(), expansions);
        assert_eq!(se.frontier_len(), frontier);
        let after: Vec<Option<u32>> = g.iter().map(|(q, _)| se.g_cost(q)).collect();
        assert_eq!(costs, after);
    }

    #[test]
    fn cheaper_rediscovery_supersedes_open_entry() {
        // The top corridor reaches (1, 2) first at cost 4; expanding (1, 3)
        // then finds it at cost 2 while it is still waiting.
        let g: Grid = "
            E#...
            ....S"
        .parse()
        .unwrap();
        let mut se = SearchEngine::from_grid(&g).unwrap();
        for _ in 0..4 {
            se.step();
        }
        assert_eq!(se.g_cost(p(1, 2)), Some(4));
        assert_eq!(se.parent(p(1, 2)), Some(p(0, 2)));
        assert!(se.is_open(p(1, 2)));

        assert_eq!(
            se.step(),
            StepResult::Advanced {
                expanded: p(1, 3),
                visited: vec![],
            }
        );
        assert_eq!(se.g_cost(p(1, 2)), Some(2));
        assert_eq!(se.parent(p(1, 2)), Some(p(1, 3)));
        assert!(se.frontier_len() > se.open_len());

        assert_eq!(se.run(), SearchStatus::Found);
        assert_eq!(se.g_cost(p(0, 0)), crate::shortest_distance(&g, p(1, 4), p(0, 0)));
        assert_eq!(
            se.path().unwrap(),
            vec![p(1, 4), p(1, 3), p(1, 2), p(1, 1), p(1, 0), p(0, 0)]
        );
        // The superseded entry is still in the heap, but nothing is open.
        assert_eq!(se.open_len(), 0);
        assert_eq!(se.frontier_len(), 1);
    }

    #[test]
    fn stale_entries_are_skipped() {
        let g = Grid::with_size(2, 2);
        let mut se = SearchEngine::new(&g, p(0, 0), p(1, 1)).unwrap();
        // Inject a stale, cheaper-looking duplicate of a position whose real
        // cost is worse than what the entry claims.
        let ti = se.idx(p(1, 0));
        se.nodes[ti].g = 1;
        se.nodes[ti].parent = Some(p(0, 0));
        se.open.push(OpenEntry {
            f: 0,
            h: 0,
            g: 7,
            pos: p(1, 0),
        });
        match se.step() {
            StepResult::Advanced { expanded, .. } => assert_eq!(expanded, p(0, 0)),
            other => panic!("expected Advanced, got {other:?}"),
        }
        assert_eq!(se.expansions(), 1);
    }
}
