use grid_jps::{Coordinate, OccupancyGrid, Pathfinder};

// In this example a path is found on a grid with shape
// #####
// #S  #
// # # #
// #  E#
// #####
// S marks the start
// E marks the end
fn main() {
    env_logger::init();
    let mut grid = OccupancyGrid::new(5, 5, true);
    grid.set_rect(Coordinate::new(1, 1), 3, 3, false);
    grid.set(Coordinate::new(2, 2), true);
    let start = Coordinate::new(1, 1);
    let end = Coordinate::new(3, 3);
    match Pathfinder::new(&grid).search(start, end) {
        Ok(Some(path)) => {
            println!("A path has been found:");
            for p in path {
                println!("{}", p);
            }
        }
        Ok(None) => println!("No path from {} to {}", start, end),
        Err(e) => eprintln!("Invalid query: {}", e),
    }
}
