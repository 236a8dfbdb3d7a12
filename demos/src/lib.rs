//! Shared pieces of the fire-escape demo: timing configuration, the render
//! overlay, and the animation state machine that paces a search.

pub mod view;

use std::time::Duration;

use escape_core::{Grid, Position};
use escape_paths::{SearchEngine, SearchError, StepResult};

/// Longest allowed delay between search steps.
pub const MAX_STEP_DELAY: Duration = Duration::from_millis(200);
/// Shortest delay between path segments.
pub const MIN_PATH_DELAY: Duration = Duration::from_millis(10);

/// Animation pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationConfig {
    /// Pause between two search steps, at most [`MAX_STEP_DELAY`].
    pub step_delay: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(50),
        }
    }
}

impl AnimationConfig {
    /// Build from a millisecond count, clamped to `0..=200`.
    pub fn from_millis(ms: u64) -> Self {
        Self {
            step_delay: Duration::from_millis(ms).min(MAX_STEP_DELAY),
        }
    }

    /// Pause between two drawn path segments: half the step delay, but never
    /// below [`MIN_PATH_DELAY`].
    pub fn path_delay(&self) -> Duration {
        (self.step_delay / 2).max(MIN_PATH_DELAY)
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// Search progress drawn over a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Visited,
    Path,
}

/// Per-cell marks kept beside the grid, so that clearing a drawn path never
/// touches the board itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    marks: Vec<Option<Mark>>,
    cols: i32,
}

impl Overlay {
    /// A blank overlay sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            marks: vec![None; grid.len()],
            cols: grid.cols(),
        }
    }

    fn offset(&self, pos: Position) -> Option<usize> {
        if pos.row < 0 || pos.col < 0 || pos.col >= self.cols {
            return None;
        }
        let i = (pos.row as usize) * (self.cols as usize) + (pos.col as usize);
        (i < self.marks.len()).then_some(i)
    }

    pub fn get(&self, pos: Position) -> Option<Mark> {
        self.offset(pos).and_then(|i| self.marks[i])
    }

    /// Mark `pos`. Off-board positions are ignored.
    pub fn mark(&mut self, pos: Position, mark: Mark) {
        if let Some(i) = self.offset(pos) {
            self.marks[i] = Some(mark);
        }
    }

    /// Drop every mark.
    pub fn clear(&mut self) {
        self.marks.fill(None);
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.marks.iter().filter(|m| **m == Some(mark)).count()
    }
}

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

/// What one [`Animation::tick`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// One search step ran.
    Searched,
    /// One more cell of the escape route was drawn.
    Drew(Position),
    /// The route is fully drawn. `steps` counts moves, not cells.
    Escaped { steps: usize },
    /// The search ran dry.
    Trapped,
}

impl Tick {
    pub fn is_final(&self) -> bool {
        matches!(self, Tick::Escaped { .. } | Tick::Trapped)
    }
}

enum Phase {
    Searching,
    Drawing { route: Vec<Position>, next: usize },
    Done(Tick),
}

/// Drives a [`SearchEngine`] one tick at a time and keeps an [`Overlay`] of
/// what has been explored.
///
/// Visited cells are marked as they join the frontier (the exit keeps its own
/// colour). Once the exit is found the route is revealed one cell per tick,
/// from the cell after the start to the cell before the exit.
pub struct Animation<'g> {
    engine: SearchEngine<'g>,
    overlay: Overlay,
    phase: Phase,
}

impl<'g> Animation<'g> {
    /// Start animating a search between the grid's own markers.
    pub fn new(grid: &'g Grid) -> Result<Self, SearchError> {
        Ok(Self {
            engine: SearchEngine::from_grid(grid)?,
            overlay: Overlay::new(grid),
            phase: Phase::Searching,
        })
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn engine(&self) -> &SearchEngine<'g> {
        &self.engine
    }

    /// Whether the next tick draws the route rather than searching.
    pub fn is_drawing(&self) -> bool {
        matches!(self.phase, Phase::Drawing { .. })
    }

    /// Advance by one tick. After a final tick, the same tick is returned
    /// again.
    pub fn tick(&mut self) -> Result<Tick, SearchError> {
        match &mut self.phase {
            Phase::Searching => match self.engine.step() {
                StepResult::Advanced { visited, .. } => {
                    let end = self.engine.end();
                    for v in visited.into_iter().filter(|&v| v != end) {
                        self.overlay.mark(v, Mark::Visited);
                    }
                    Ok(Tick::Searched)
                }
                StepResult::Found => {
                    let path = self.engine.path()?;
                    let route = path[1..path.len() - 1].to_vec();
                    log::info!("escape route found: {} moves", path.len() - 1);
                    self.phase = Phase::Drawing { route, next: 0 };
                    Ok(Tick::Searched)
                }
                StepResult::Exhausted => {
                    log::info!("no escape route from {}", self.engine.start());
                    self.phase = Phase::Done(Tick::Trapped);
                    Ok(Tick::Trapped)
                }
            },
            Phase::Drawing { route, next } => {
                if let Some(&pos) = route.get(*next) {
                    *next += 1;
                    self.overlay.mark(pos, Mark::Path);
                    return Ok(Tick::Drew(pos));
                }
                let done = Tick::Escaped {
                    steps: route.len() + 1,
                };
                self.phase = Phase::Done(done.clone());
                Ok(done)
            }
            Phase::Done(tick) => Ok(tick.clone()),
        }
    }

    /// Tick until a final result, without pausing.
    pub fn finish(&mut self) -> Result<Tick, SearchError> {
        loop {
            let t = self.tick()?;
            if t.is_final() {
                return Ok(t);
            }
        }
    }

    /// Stop the animation and hand the overlay back, as "Clear Path" would
    /// discard it.
    pub fn into_overlay(self) -> Overlay {
        self.overlay
    }
}
