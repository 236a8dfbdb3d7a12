//! **escape-core** — the fire-escape board.
//!
//! This crate provides the grid model shared by the search engine and any
//! front end that edits or renders a board: [`Position`] coordinates, typed
//! [`Cell`]s, the endpoint-aware [`Grid`], and a random board generator.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod scatter;

pub use cell::Cell;
pub use error::GridError;
pub use geom::Position;
pub use grid::{Grid, GridConfig, GridIter, Neighbors4};
pub use scatter::{Scatter, ScatterConfig};
