use std::fmt;

use escape_core::Position;

/// Why a pair of endpoints cannot seed a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndpointProblem {
    MissingStart,
    MissingEnd,
    /// Start and end are the same cell.
    Identical,
    /// An endpoint lies off the board.
    OutOfBounds(Position),
    /// The start sits on a wall or hazard.
    StartBlocked,
    /// The end sits on a wall or hazard.
    EndBlocked,
}

impl fmt::Display for EndpointProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => f.write_str("no start point is set"),
            Self::MissingEnd => f.write_str("no exit point is set"),
            Self::Identical => f.write_str("start and exit are the same cell"),
            Self::OutOfBounds(p) => write!(f, "endpoint {p} is outside the grid"),
            Self::StartBlocked => f.write_str("start is on an impassable cell"),
            Self::EndBlocked => f.write_str("exit is on an impassable cell"),
        }
    }
}

/// Errors from building a search or reconstructing its path.
///
/// Running out of frontier is not an error: it is reported as
/// [`SearchStatus::Exhausted`](crate::SearchStatus::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The search could not be created.
    InvalidEndpoints(EndpointProblem),
    /// A path was requested before the search reached the goal.
    NoPathAvailable,
    /// A position on the way back from the goal had no parent. This is an
    /// internal invariant violation.
    BrokenParentChain(Position),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoints(why) => write!(f, "invalid search endpoints: {why}"),
            Self::NoPathAvailable => f.write_str("no path available: the search has not found the goal"),
            Self::BrokenParentChain(p) => write!(f, "broken parent chain at {p}"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<EndpointProblem> for SearchError {
    fn from(why: EndpointProblem) -> Self {
        Self::InvalidEndpoints(why)
    }
}
