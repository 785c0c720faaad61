//! Many independent searches over one shared grid.
use log::debug;
use std::thread;

use crate::coordinate::Coordinate;
use crate::error::SearchError;
use crate::search::Pathfinder;

pub type BatchResult = Result<Option<Vec<Coordinate>>, SearchError>;

/// Runs one search per `(start, goal)` pair on up to `threads` scoped threads. Every search
/// owns its own frontier, so the only shared state is the read-only grid. Results come back in
/// the order of `queries`.
pub fn run_batch(
    pathfinder: &Pathfinder,
    queries: &[(Coordinate, Coordinate)],
    threads: usize,
) -> Vec<BatchResult> {
    if queries.is_empty() {
        return Vec::new();
    }
    let threads = threads.clamp(1, queries.len());
    let chunk_size = queries.len().div_ceil(threads);
    debug!(
        "Running {} searches on {} threads",
        queries.len(),
        threads
    );
    thread::scope(|scope| {
        let handles: Vec<_> = queries
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|&(start, goal)| pathfinder.search(start, goal))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::occupancy_grid::OccupancyGrid;

    #[test]
    fn results_follow_query_order() {
        let mut grid = OccupancyGrid::new(8, 8, false);
        grid.set_rect(Coordinate::new(0, 4), 8, 1, true);
        let pathfinder = Pathfinder::with_config(&grid, SearchConfig::new());
        let queries: Vec<(Coordinate, Coordinate)> = (0..8)
            .map(|row| (Coordinate::new(row, 0), Coordinate::new(7 - row, 3)))
            .chain([(Coordinate::new(0, 0), Coordinate::new(0, 7))])
            .chain([(Coordinate::new(0, 0), Coordinate::new(0, 4))])
            .collect();
        let sequential: Vec<BatchResult> = queries
            .iter()
            .map(|&(start, goal)| pathfinder.search(start, goal))
            .collect();
        for threads in [1, 3, 16] {
            assert_eq!(run_batch(&pathfinder, &queries, threads), sequential);
        }
        assert_eq!(sequential[8], Ok(None));
        assert!(matches!(sequential[9], Err(SearchError::Blocked { .. })));
        assert!(sequential[..8].iter().all(|r| matches!(r, Ok(Some(_)))));
    }

    #[test]
    fn empty_batch() {
        let grid = OccupancyGrid::new(2, 2, false);
        assert!(run_batch(&Pathfinder::new(&grid), &[], 4).is_empty());
    }
}
