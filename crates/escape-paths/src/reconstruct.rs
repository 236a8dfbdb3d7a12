use escape_core::Position;

use crate::astar::{SearchEngine, SearchStatus};
use crate::error::SearchError;

/// Walk parent links back from the goal and return the route from start to
/// end, both included.
///
/// Fails with [`SearchError::NoPathAvailable`] unless the search has reached
/// [`SearchStatus::Found`].
pub fn reconstruct(search: &SearchEngine<'_>) -> Result<Vec<Position>, SearchError> {
    if search.status() != SearchStatus::Found {
        return Err(SearchError::NoPathAvailable);
    }

    let start = search.start();
    let mut path = vec![search.end()];
    let mut cur = search.end();
    // A chain longer than the board must loop.
    let limit = search.grid().len();

    while cur != start {
        let next = match search.parent(cur) {
            Some(p) if path.len() <= limit => p,
            _ => {
                log::warn!(
                    "parent chain from {} broke at {cur} after {} links",
                    search.end(),
                    path.len() - 1
                );
                return Err(SearchError::BrokenParentChain(cur));
            }
        };
        path.push(next);
        cur = next;
    }

    path.reverse();
    Ok(path)
}
