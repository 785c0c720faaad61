use smallvec::SmallVec;

use crate::config::Pruning;
use crate::coordinate::{octile, Coordinate, Direction};
use crate::occupancy_grid::OccupancyGrid;
use crate::N_SMALLVEC_SIZE;

/// Candidate directions to explore from `node` given the jump point it was reached from.
///
/// The start node (no parent) expands all eight directions. Straight travel keeps going
/// straight and tries the two diagonals bending towards it; diagonal travel tries its two
/// straight components and the diagonal itself. Nothing is checked against the grid here:
/// blocked directions simply fail to jump.
pub fn pruned_directions(node: Coordinate, parent: Option<Coordinate>) -> SmallVec<[Direction; 8]> {
    let Some(dir) = parent.and_then(|parent| parent.dir_to(&node)) else {
        return SmallVec::from_buf(Direction::ALL);
    };
    let (d_row, d_col) = dir.delta();
    let turn = |row, col| Direction::from_delta(row, col).into_iter();
    match (d_row, d_col) {
        (_, 0) => std::iter::once(dir)
            .chain(turn(d_row, -1))
            .chain(turn(d_row, 1))
            .collect(),
        (0, _) => std::iter::once(dir)
            .chain(turn(-1, d_col))
            .chain(turn(1, d_col))
            .collect(),
        _ => turn(0, d_col)
            .chain(turn(d_row, 0))
            .chain(std::iter::once(dir))
            .collect(),
    }
}

/// Resolves directions into jump points for one search towards `goal`.
#[derive(Clone, Debug)]
pub struct JumpScanner<'a> {
    grid: &'a OccupancyGrid,
    goal: Coordinate,
    pruning: Pruning,
}

impl<'a> JumpScanner<'a> {
    pub fn new(grid: &'a OccupancyGrid, goal: Coordinate, pruning: Pruning) -> JumpScanner<'a> {
        JumpScanner {
            grid,
            goal,
            pruning,
        }
    }

    /// Jump points reachable from `node` together with the octile cost of the jump.
    pub fn successors(
        &self,
        parent: Option<Coordinate>,
        node: Coordinate,
    ) -> SmallVec<[(Coordinate, f64); N_SMALLVEC_SIZE]> {
        self.directions(parent, node)
            .into_iter()
            .filter_map(|dir| self.jump(node, dir))
            .map(|jump_point| (jump_point, octile(&node, &jump_point)))
            .collect()
    }

    /// The pruned direction set, extended with the forced directions at `node` when
    /// [Pruning::ForcedNeighbours] is selected.
    pub fn directions(
        &self,
        parent: Option<Coordinate>,
        node: Coordinate,
    ) -> SmallVec<[Direction; 8]> {
        let mut dirs = pruned_directions(node, parent);
        if self.pruning == Pruning::ForcedNeighbours {
            if let Some(arrival) = parent.and_then(|parent| parent.dir_to(&node)) {
                for dir in self.forced_directions(node, arrival) {
                    if !dirs.contains(&dir) {
                        dirs.push(dir);
                    }
                }
            }
        }
        dirs
    }

    fn walkable(&self, row: i32, col: i32) -> bool {
        self.grid.walkable(Coordinate::new(row, col))
    }

    /// Directions that only become optimal at `node` because an obstacle beside the
    /// arrival direction cuts off the neighbour behind it.
    fn forced_directions(&self, node: Coordinate, arrival: Direction) -> SmallVec<[Direction; 2]> {
        let (d_row, d_col) = arrival.delta();
        let (row, col) = (node.row, node.col);
        let mut forced: SmallVec<[Direction; 2]> = SmallVec::new();
        let mut force = |blocked: (i32, i32), open: (i32, i32)| {
            if !self.walkable(blocked.0, blocked.1) && self.walkable(open.0, open.1) {
                forced.extend(Direction::from_delta(open.0 - row, open.1 - col));
            }
        };
        match (d_row, d_col) {
            (_, 0) => {
                for side in [1, -1] {
                    force((row, col + side), (row + d_row, col + side));
                }
            }
            (0, _) => {
                for side in [1, -1] {
                    force((row + side, col), (row + side, col + d_col));
                }
            }
            _ => {
                force((row - d_row, col), (row - d_row, col + d_col));
                force((row, col - d_col), (row + d_row, col - d_col));
            }
        }
        forced
    }

    /// Whether `next`, reached from `origin` by moving in `dir`, has to become a jump point.
    fn is_forced(&self, origin: Coordinate, next: Coordinate, dir: Direction) -> bool {
        let (d_row, d_col) = dir.delta();
        let forced = match (d_row, d_col) {
            // A side cell opens up where the cell beside the origin was blocked.
            (_, 0) => [1, -1].into_iter().any(|side| {
                self.walkable(next.row, next.col + side)
                    && !self.walkable(origin.row, next.col + side)
            }),
            (0, _) => [1, -1].into_iter().any(|side| {
                self.walkable(next.row + side, next.col)
                    && !self.walkable(next.row + side, origin.col)
            }),
            // Both cells of a pair lie on the origin's row or column, so for a walkable origin
            // the natural diagonal test never fires.
            _ if self.pruning == Pruning::Natural => {
                (self.walkable(next.row - d_row, next.col)
                    && !self.walkable(origin.row, next.col))
                    || (self.walkable(next.row, next.col - d_col)
                        && !self.walkable(next.row, origin.col))
            }
            _ => {
                (self.walkable(next.row - d_row, next.col + d_col)
                    && !self.walkable(next.row - d_row, next.col))
                    || (self.walkable(next.row + d_row, next.col - d_col)
                        && !self.walkable(next.row, next.col - d_col))
            }
        };
        forced
            || (self.pruning == Pruning::ForcedNeighbours
                && !self.forced_directions(next, dir).is_empty())
    }

    /// Straight jump in a cardinal direction.
    fn jump_straight(&self, mut initial: Coordinate, direction: Direction) -> Option<Coordinate> {
        debug_assert!(!direction.diagonal());
        loop {
            let next = initial + direction;
            if !self.grid.walkable(next) {
                return None;
            }
            if next == self.goal || self.is_forced(initial, next, direction) {
                return Some(next);
            }
            initial = next;
        }
    }

    /// Walks from `initial` in `direction` until the goal, a forced cell or, for diagonal
    /// moves, a cell from which one of the straight components finds a jump point. Returns
    /// [None] once the ray runs into an obstacle or the grid border.
    pub fn jump(&self, mut initial: Coordinate, direction: Direction) -> Option<Coordinate> {
        let (Some(row_dir), Some(col_dir)) = (direction.row_dir(), direction.col_dir()) else {
            return self.jump_straight(initial, direction);
        };
        loop {
            let next = initial + direction;
            if !self.grid.walkable(next) {
                return None;
            }
            if next == self.goal || self.is_forced(initial, next, direction) {
                return Some(next);
            }
            if self.jump_straight(next, row_dir).is_some()
                || self.jump_straight(next, col_dir).is_some()
            {
                return Some(next);
            }
            initial = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn start_expands_everything() {
        let dirs = pruned_directions(c(3, 3), None);
        assert_eq!(dirs.as_slice(), &Direction::ALL);
    }

    #[test]
    fn straight_travel_keeps_heading() {
        // Parent several cells away: only the sign of the offset matters.
        assert_eq!(
            pruned_directions(c(5, 2), Some(c(1, 2))).as_slice(),
            &[South, SouthWest, SouthEast]
        );
        assert_eq!(
            pruned_directions(c(5, 2), Some(c(5, 4))).as_slice(),
            &[West, NorthWest, SouthWest]
        );
    }

    #[test]
    fn diagonal_travel_splits_into_components() {
        assert_eq!(
            pruned_directions(c(4, 4), Some(c(1, 1))).as_slice(),
            &[East, South, SouthEast]
        );
        assert_eq!(
            pruned_directions(c(0, 0), Some(c(2, 2))).as_slice(),
            &[West, North, NorthWest]
        );
    }

    #[test]
    fn jump_into_wall_fails() {
        let grid: OccupancyGrid = ".#\n..\n".parse().unwrap();
        let scanner = JumpScanner::new(&grid, c(1, 1), Pruning::Natural);
        assert_eq!(scanner.jump(c(0, 0), East), None);
        assert_eq!(scanner.jump(c(0, 0), North), None);
    }

    #[test]
    fn jump_stops_on_goal() {
        let grid = OccupancyGrid::new(1, 8, false);
        let scanner = JumpScanner::new(&grid, c(0, 5), Pruning::Natural);
        assert_eq!(scanner.jump(c(0, 0), East), Some(c(0, 5)));
        assert_eq!(scanner.jump(c(0, 7), West), Some(c(0, 5)));
    }

    #[test]
    fn straight_jump_stops_where_wall_ends() {
        // .#.
        // .#.
        // ...
        // ...
        let grid: OccupancyGrid = ".#.\n.#.\n...\n...\n".parse().unwrap();
        let scanner = JumpScanner::new(&grid, c(0, 2), Pruning::Natural);
        assert_eq!(scanner.jump(c(0, 0), South), Some(c(2, 0)));
    }

    #[test]
    fn diagonal_jump_stops_when_component_finds_goal() {
        let grid = OccupancyGrid::new(5, 5, false);
        let scanner = JumpScanner::new(&grid, c(4, 2), Pruning::Natural);
        assert_eq!(scanner.jump(c(0, 0), SouthEast), Some(c(2, 2)));
    }

    #[test]
    fn diagonal_jump_stops_at_cut_corner() {
        // .#.
        // ...
        // ...
        let grid: OccupancyGrid = ".#.\n...\n...\n".parse().unwrap();
        let scanner = JumpScanner::new(&grid, c(9, 9), Pruning::Natural);
        assert_eq!(scanner.jump(c(0, 0), SouthEast), Some(c(1, 1)));
    }

    #[test]
    fn forced_neighbours_stop_at_wall_start() {
        // .....
        // ..#..
        let grid: OccupancyGrid = ".....\n..#..\n".parse().unwrap();
        let natural = JumpScanner::new(&grid, c(5, 5), Pruning::Natural);
        let forced = JumpScanner::new(&grid, c(5, 5), Pruning::ForcedNeighbours);
        assert_eq!(natural.jump(c(0, 0), East), Some(c(0, 3)));
        assert_eq!(forced.jump(c(0, 0), East), Some(c(0, 2)));
    }

    #[test]
    fn natural_diagonal_scan_runs_past_corners() {
        // ....
        // ..#.
        // .#.#
        // ..#.
        let grid: OccupancyGrid = "....\n..#.\n.#.#\n..#.\n".parse().unwrap();
        let natural = JumpScanner::new(&grid, c(3, 3), Pruning::Natural);
        let forced = JumpScanner::new(&grid, c(3, 3), Pruning::ForcedNeighbours);
        assert_eq!(natural.jump(c(0, 0), SouthEast), Some(c(3, 3)));
        assert_eq!(forced.jump(c(0, 0), SouthEast), Some(c(2, 2)));
    }

    #[test]
    fn forced_directions_extend_diagonal_arrivals() {
        // .#..
        // ....
        // ....
        let grid: OccupancyGrid = ".#..\n....\n....\n".parse().unwrap();
        let natural = JumpScanner::new(&grid, c(2, 3), Pruning::Natural);
        let forced = JumpScanner::new(&grid, c(2, 3), Pruning::ForcedNeighbours);
        let parent = Some(c(0, 0));
        assert_eq!(
            natural.directions(parent, c(1, 1)).as_slice(),
            &[East, South, SouthEast]
        );
        assert_eq!(
            forced.directions(parent, c(1, 1)).as_slice(),
            &[East, South, SouthEast, NorthEast]
        );
    }

    #[test]
    fn successors_are_priced_by_octile_distance() {
        let grid = OccupancyGrid::new(3, 3, false);
        let scanner = JumpScanner::new(&grid, c(2, 2), Pruning::Natural);
        let succ = scanner.successors(None, c(0, 0));
        assert_eq!(succ.as_slice(), &[(c(2, 2), octile(&c(0, 0), &c(2, 2)))]);
    }
}
