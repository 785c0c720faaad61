use log::debug;
use serde::{Deserialize, Serialize};

use crate::astar_jps::SearchContext;
use crate::config::SearchConfig;
use crate::coordinate::{octile, Coordinate};
use crate::error::{Endpoint, SearchError};
use crate::jps::JumpScanner;
use crate::occupancy_grid::OccupancyGrid;
use crate::trace::SearchObserver;

/// Everything a finished search reports besides the path itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Jump points from start to goal, both inclusive, or [None] if the frontier ran dry.
    pub path: Option<Vec<Coordinate>>,
    /// Octile length of the path.
    pub cost: Option<f64>,
    /// Expanded coordinates, sorted.
    pub closed: Vec<Coordinate>,
    pub expansions: usize,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Runs Jump Point Search over a borrowed grid. The grid is never modified, so any number
/// of pathfinders (on any number of threads) may share it.
#[derive(Clone, Debug)]
pub struct Pathfinder<'a> {
    grid: &'a OccupancyGrid,
    config: SearchConfig,
}

impl<'a> Pathfinder<'a> {
    pub fn new(grid: &'a OccupancyGrid) -> Pathfinder<'a> {
        Pathfinder::with_config(grid, SearchConfig::default())
    }

    pub fn with_config(grid: &'a OccupancyGrid, config: SearchConfig) -> Pathfinder<'a> {
        Pathfinder { grid, config }
    }

    pub fn grid(&self) -> &'a OccupancyGrid {
        self.grid
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn validate(&self, endpoint: Endpoint, coordinate: Coordinate) -> Result<(), SearchError> {
        if !self.grid.in_bounds(coordinate) {
            Err(SearchError::OutOfBounds {
                endpoint,
                coordinate,
                height: self.grid.height(),
                width: self.grid.width(),
            })
        } else if !self.grid.walkable(coordinate) {
            Err(SearchError::Blocked {
                endpoint,
                coordinate,
            })
        } else {
            Ok(())
        }
    }

    /// The jump points of a path from `start` to `goal`, or [None] if there is none.
    pub fn search(
        &self,
        start: Coordinate,
        goal: Coordinate,
    ) -> Result<Option<Vec<Coordinate>>, SearchError> {
        self.search_observed(start, goal, &mut ())
            .map(|outcome| outcome.path)
    }

    /// Same as [search](Self::search), reporting every expansion to `observer` and
    /// returning the full [SearchOutcome].
    pub fn search_observed<O>(
        &self,
        start: Coordinate,
        goal: Coordinate,
        observer: &mut O,
    ) -> Result<SearchOutcome, SearchError>
    where
        O: SearchObserver,
    {
        if self.config.validate_endpoints {
            self.validate(Endpoint::Start, start)?;
            self.validate(Endpoint::Goal, goal)?;
        }
        debug!("Searching from {} to {}", start, goal);
        let scanner = JumpScanner::new(self.grid, goal, self.config.pruning);
        let mut ct: SearchContext<Coordinate, f64> = SearchContext::new();
        let result = ct.astar_jps(
            &start,
            |parent, node| scanner.successors(parent.copied(), *node),
            |point| octile(point, &goal),
            |point| *point == goal,
            self.config.max_expansions,
            observer,
        )?;
        let mut closed: Vec<Coordinate> = ct.closed_nodes().copied().collect();
        closed.sort();
        let (path, cost) = match result {
            Some((path, cost)) => (Some(path), Some(cost)),
            None => (None, None),
        };
        Ok(SearchOutcome {
            path,
            cost,
            closed,
            expansions: ct.expansions(),
        })
    }
}

/// Jump Point Search from `start` to `goal` with the natural pruning rule and no endpoint
/// checks. Returns the jump points of the path, both endpoints included, or [None] if the
/// goal cannot be reached.
///
/// Consecutive jump points are joined by an unobstructed straight or diagonal run; use
/// [waypoints_to_path](crate::waypoints_to_path) to get every cell in between.
pub fn search(
    grid: &OccupancyGrid,
    start: Coordinate,
    goal: Coordinate,
) -> Option<Vec<Coordinate>> {
    Pathfinder::with_config(grid, SearchConfig::unchecked())
        .search(start, goal)
        .ok()
        .flatten()
}
