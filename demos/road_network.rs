use grid_jps::raster::{
    load_benchmark_points, rasterize, snap_to_nearest_node, GeoPoint, RoadNetwork,
};
use grid_jps::report::PathReport;
use grid_jps::{Pathfinder, SearchConfig};
use std::error::Error;
use std::io;
use std::path::Path;

/// A few streets around a city block, as (lat, lon) nodes joined by straight segments.
fn street_grid() -> RoadNetwork {
    let mut network = RoadNetwork::new_undirected();
    let corners = [
        (14.6500, 121.0300),
        (14.6500, 121.0500),
        (14.6700, 121.0500),
        (14.6700, 121.0300),
        (14.6600, 121.0400),
        (14.6760, 121.0560),
    ];
    let nodes: Vec<_> = corners
        .iter()
        .map(|&(lat, lon)| network.add_node(GeoPoint::new(lat, lon)))
        .collect();
    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0), (0, 4), (4, 2), (2, 5)] {
        network.add_edge(nodes[a], nodes[b], ());
    }
    network
}

/// Searches between named points of interest on a rasterized road network. The points are
/// read from `demos/benchmark_points.json`; an optional first argument is read as a TOML search
/// configuration.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let config = match std::env::args().nth(1) {
        Some(path) => SearchConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => SearchConfig::default(),
    };
    let network = street_grid();
    let (mut grid, projection) = rasterize(&network, 2000.0)?;
    println!(
        "Grid ready with shape {}x{}",
        grid.height(),
        grid.width()
    );

    let points = load_benchmark_points(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/benchmark_points.json"),
    )?;
    let benchmark_pairs = [("Depot", "Market"), ("Market", "School")];
    for (key, (src, dst)) in benchmark_pairs.into_iter().enumerate() {
        let (Some(&src_point), Some(&dst_point)) = (points.get(src), points.get(dst)) else {
            println!("Unknown benchmark point in {} -> {}", src, dst);
            continue;
        };
        let (Some(start_geo), Some(goal_geo)) = (
            snap_to_nearest_node(&network, src_point),
            snap_to_nearest_node(&network, dst_point),
        ) else {
            continue;
        };
        let start = projection.to_cell_in(start_geo, &grid);
        let goal = projection.to_cell_in(goal_geo, &grid);
        grid.set(start, false);
        grid.set(goal, false);

        let pathfinder = Pathfinder::with_config(&grid, config.clone());
        let Some(path) = pathfinder.search(start, goal)? else {
            println!("No path found for {} -> {}", src, dst);
            continue;
        };
        let coords: Vec<GeoPoint> = path.iter().map(|&cell| projection.to_geo(cell)).collect();
        let report = PathReport::new(format!("{}: {} -> {}", key + 1, src, dst), start, goal, path);
        report.write_log(io::stdout().lock())?;
        println!("Route: {}", serde_json::to_string(&coords)?);
        println!("{}", report.to_json()?);
    }
    Ok(())
}
