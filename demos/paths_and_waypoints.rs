use grid_jps::trace::LogObserver;
use grid_jps::{waypoints_to_path, Coordinate, OccupancyGrid, Pathfinder, Pruning, SearchConfig};

/// This example illustrates the type of output a search gives. It is a minimal
/// representation made of jump points that can be expanded using [waypoints_to_path].
/// A path is found on a 5x5 grid with shape
/// S....
/// .#...
/// .....
/// .....
/// ....E
/// where
/// - S marks the start
/// - E marks the end
///
/// Run with `RUST_LOG=trace` to see every expansion.
fn main() {
    env_logger::init();
    let grid: OccupancyGrid = "S....\n.#...\n.....\n.....\n....G\n"
        .parse()
        .expect("map is well formed");
    println!("{}", grid);
    let start = Coordinate::new(0, 0);
    let end = Coordinate::new(4, 4);
    for pruning in [Pruning::Natural, Pruning::ForcedNeighbours] {
        let pathfinder = Pathfinder::with_config(&grid, SearchConfig::new().with_pruning(pruning));
        let outcome = pathfinder
            .search_observed(start, end, &mut LogObserver)
            .expect("endpoints are free");
        println!(
            "{:?}: {} expansions, closed set {:?}",
            pruning, outcome.expansions, outcome.closed
        );
        if let Some(path) = outcome.path {
            println!("Unexpanded path:");
            for p in &path {
                println!("{}", p);
            }
            println!("Expanded path:");
            for p in waypoints_to_path(path) {
                println!("{}", p);
            }
        }
    }
}
