//! # grid_jps
//!
//! [Jump Point Search](https://en.wikipedia.org/wiki/Jump_point_search) over a binary occupancy
//! grid with 8-connected movement. Instead of pushing every neighbouring cell onto the frontier,
//! the search scans straight and diagonal rays and only keeps the cells where something
//! interesting happens (the goal, an obstacle corner, or a diagonal whose components find one of
//! those). Costs are octile distances, so diagonal steps cost √2.
//!
//! Diagonal moves may cut obstacle corners: a diagonal step is allowed as long as the target cell
//! is free.
//!
//! Besides the search itself the crate provides [connected components](components) to answer
//! reachability without searching, a [rasterizer](raster) turning road networks into grids and a
//! small [report](report) format for finished searches.
mod astar_jps;
pub mod batch;
pub mod components;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod jps;
pub mod occupancy_grid;
pub mod raster;
pub mod report;
pub mod search;
pub mod trace;

use itertools::Itertools;

pub use crate::astar_jps::SearchContext;
pub use crate::batch::run_batch;
pub use crate::components::ComponentMap;
pub use crate::config::{Pruning, SearchConfig};
pub use crate::coordinate::{octile, Coordinate, Direction};
pub use crate::error::{Endpoint, SearchError};
pub use crate::occupancy_grid::OccupancyGrid;
pub use crate::search::{search, Pathfinder, SearchOutcome};

/// Inline capacity of successor lists; a jump point has at most eight successors.
pub const N_SMALLVEC_SIZE: usize = 8;

/// Turns waypoints into a path on the grid which can be followed step by step. Each leg walks
/// diagonally until it is aligned with the next waypoint and straight afterwards, so for jump
/// points (which are always aligned) this is the exact run the search scanned.
pub fn waypoints_to_path(waypoints: Vec<Coordinate>) -> Vec<Coordinate> {
    let mut waypoints = waypoints.into_iter();
    let Some(mut current) = waypoints.next() else {
        return Vec::new();
    };
    let mut path = vec![current];
    for next in waypoints {
        while let Some(dir) = current.dir_to(&next) {
            current = current + dir;
            path.push(current);
        }
    }
    path
}

/// Octile length of a sequence of waypoints.
pub fn path_cost(waypoints: &[Coordinate]) -> f64 {
    waypoints
        .iter()
        .tuple_windows()
        .map(|(a, b)| octile(a, b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn waypoints_expand_into_unit_steps() {
        let path = waypoints_to_path(vec![c(0, 0), c(2, 2), c(2, 4)]);
        assert_eq!(
            path,
            vec![c(0, 0), c(1, 1), c(2, 2), c(2, 3), c(2, 4)]
        );
        assert!(path
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.move_distance(b) == 1));
    }

    #[test]
    fn unaligned_waypoints_go_diagonal_first() {
        assert_eq!(
            waypoints_to_path(vec![c(0, 0), c(1, 3)]),
            vec![c(0, 0), c(1, 1), c(1, 2), c(1, 3)]
        );
    }

    #[test]
    fn degenerate_waypoint_lists() {
        assert!(waypoints_to_path(Vec::new()).is_empty());
        assert_eq!(waypoints_to_path(vec![c(3, 3)]), vec![c(3, 3)]);
        assert_eq!(path_cost(&[c(3, 3)]), 0.0);
    }

    #[test]
    fn cost_sums_octile_legs() {
        let cost = path_cost(&[c(0, 0), c(2, 2), c(2, 4)]);
        assert!((cost - (2.0 * SQRT_2 + 2.0)).abs() < 1e-9);
    }
}
