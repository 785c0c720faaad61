use log::info;
use petgraph::unionfind::UnionFind;

use crate::coordinate::{Coordinate, Direction};
use crate::occupancy_grid::OccupancyGrid;

/// Connected components of the walkable cells of an [OccupancyGrid] under 8-connectivity,
/// the same moves a search may take. Lets callers rule out unreachable goals without
/// flood-filling through a search.
#[derive(Clone, Debug)]
pub struct ComponentMap {
    width: usize,
    height: usize,
    components: UnionFind<usize>,
    walkable: Vec<bool>,
}

impl ComponentMap {
    /// Links up every walkable cell with its walkable neighbours.
    pub fn new(grid: &OccupancyGrid) -> ComponentMap {
        info!(
            "Generating connected components for a {}x{} grid",
            grid.height(),
            grid.width()
        );
        let mut map = ComponentMap {
            width: grid.width(),
            height: grid.height(),
            components: UnionFind::new(grid.width() * grid.height()),
            walkable: grid.coordinates().map(|p| grid.walkable(p)).collect(),
        };
        // Looking forward is enough: each pair is visited from its earlier cell.
        let forward = [
            Direction::East,
            Direction::SouthWest,
            Direction::South,
            Direction::SouthEast,
        ];
        for point in grid.coordinates().filter(|p| grid.walkable(*p)) {
            let parent_ix = map.ix(point);
            for dir in forward {
                let neighbour = point + dir;
                if grid.walkable(neighbour) {
                    let ix = map.ix(neighbour);
                    map.components.union(parent_ix, ix);
                }
            }
        }
        map
    }

    fn ix(&self, point: Coordinate) -> usize {
        point.row as usize * self.width + point.col as usize
    }

    fn is_walkable(&self, point: Coordinate) -> bool {
        point.row >= 0
            && point.col >= 0
            && (point.row as usize) < self.height
            && (point.col as usize) < self.width
            && self.walkable[self.ix(point)]
    }

    /// Representative of the component a walkable cell belongs to.
    pub fn component(&self, point: Coordinate) -> Option<usize> {
        if self.is_walkable(point) {
            Some(self.components.find(self.ix(point)))
        } else {
            None
        }
    }

    /// Checks if both cells are walkable and on the same component.
    pub fn reachable(&self, start: Coordinate, goal: Coordinate) -> bool {
        match (self.component(start), self.component(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn unreachable(&self, start: Coordinate, goal: Coordinate) -> bool {
        !self.reachable(start, goal)
    }

    /// Every cell on the same component as `point`, in row-major order.
    pub fn region(&self, point: Coordinate) -> Vec<Coordinate> {
        let Some(id) = self.component(point) else {
            return Vec::new();
        };
        (0..self.height as i32)
            .flat_map(|row| (0..self.width as i32).map(move |col| Coordinate::new(row, col)))
            .filter(|p| self.component(*p) == Some(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // .#.
        // .#.
        let grid: OccupancyGrid = ".#.\n.#.\n".parse().unwrap();
        let components = ComponentMap::new(&grid);
        let p1 = Coordinate::new(0, 0);
        let p2 = Coordinate::new(1, 1);
        let p3 = Coordinate::new(1, 0);
        let p4 = Coordinate::new(0, 2);
        assert_eq!(components.component(p2), None);
        assert!(components.reachable(p1, p3));
        assert!(components.unreachable(p1, p2));
        assert!(components.unreachable(p1, p4));
        assert_eq!(components.region(p4).len(), 2);
    }

    /// Diagonal moves may squeeze between two blocked cells.
    #[test]
    fn diagonal_corners_connect() {
        // .#
        // #.
        let grid: OccupancyGrid = ".#\n#.\n".parse().unwrap();
        let components = ComponentMap::new(&grid);
        assert!(components.reachable(Coordinate::new(0, 0), Coordinate::new(1, 1)));
        // .#
        // .#
        // #.
        let grid: OccupancyGrid = ".#\n.#\n#.\n".parse().unwrap();
        let components = ComponentMap::new(&grid);
        assert!(components.reachable(Coordinate::new(0, 0), Coordinate::new(2, 1)));
    }

    #[test]
    fn out_of_bounds_is_unreachable() {
        let grid = OccupancyGrid::new(2, 2, false);
        let components = ComponentMap::new(&grid);
        assert!(components.unreachable(Coordinate::new(0, 0), Coordinate::new(2, 2)));
        assert!(components.region(Coordinate::new(-1, 0)).is_empty());
        assert_eq!(components.region(Coordinate::new(0, 0)).len(), 4);
    }
}
