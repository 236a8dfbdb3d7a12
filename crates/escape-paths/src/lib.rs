//! Step-driven A* pathfinding for the fire-escape board.
//!
//! The pieces fit together as follows:
//!
//! 1. Edit an [`escape_core::Grid`] (walls, hazards, start and exit).
//! 2. Bind a [`SearchEngine`] to it. The engine borrows the grid, so the
//!    board is frozen for as long as the search lives.
//! 3. Call [`SearchEngine::step`] at whatever pace suits the caller until it
//!    reports [`StepResult::Found`] or [`StepResult::Exhausted`].
//! 4. On `Found`, [`reconstruct`] the start → end route.
//!
//! Moves are orthogonal with unit cost and the heuristic is [`manhattan`], so
//! the route found is a shortest one. [`shortest_distance`] offers a plain BFS
//! answer to check against.

mod astar;
mod bfs;
mod distance;
mod error;
mod frontier;
mod reconstruct;

pub use astar::{SearchEngine, SearchStatus, StepResult};
pub use bfs::shortest_distance;
pub use distance::manhattan;
pub use error::{EndpointProblem, SearchError};
pub use reconstruct::reconstruct;
