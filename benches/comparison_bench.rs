use criterion::{criterion_group, criterion_main, Criterion};
use grid_jps::{ComponentMap, Coordinate, OccupancyGrid, Pathfinder, Pruning, SearchConfig};
use grid_jps_benchmark::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use std::path::Path;

const PRUNING_MODES: [(Pruning, &str); 2] = [
    (Pruning::Natural, "natural"),
    (Pruning::ForcedNeighbours, "forced neighbours"),
];

fn scenario_bench(c: &mut Criterion) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let bench_set = ["demo/walls"];
    for name in bench_set {
        let Ok(benchmark) = load_benchmark(root, name) else {
            continue;
        };
        for (pruning, pruning_str) in PRUNING_MODES {
            let pathfinder = Pathfinder::with_config(
                &benchmark.grid,
                SearchConfig::new().with_pruning(pruning),
            );
            c.bench_function(format!("{name}, {pruning_str}").as_str(), |b| {
                b.iter(|| {
                    for scenario in &benchmark.scenarios {
                        black_box(pathfinder.search(scenario.start(), scenario.goal()).ok());
                    }
                })
            });
        }
    }
}

/// Random free cells, drawn with a fixed seed.
fn random_queries(grid: &OccupancyGrid, number: usize) -> Vec<(Coordinate, Coordinate)> {
    let mut rng = StdRng::seed_from_u64(0);
    let mut free = || loop {
        let p = Coordinate::new(
            rng.gen_range(0..grid.height() as i32),
            rng.gen_range(0..grid.width() as i32),
        );
        if grid.walkable(p) {
            return p;
        }
    };
    (0..number).map(|_| (free(), free())).collect()
}

fn random_grid_bench(c: &mut Criterion) {
    const N: usize = 64;
    let mut rng = StdRng::seed_from_u64(1);
    let mut grid = OccupancyGrid::new(N, N, false);
    for p in grid.coordinates().collect::<Vec<_>>() {
        grid.set(p, rng.gen_bool(0.25));
    }
    let components = ComponentMap::new(&grid);
    let queries: Vec<_> = random_queries(&grid, 64)
        .into_iter()
        .filter(|(start, goal)| components.reachable(*start, *goal))
        .collect();
    for (pruning, pruning_str) in PRUNING_MODES {
        let pathfinder =
            Pathfinder::with_config(&grid, SearchConfig::new().with_pruning(pruning));
        c.bench_function(format!("random {N}x{N}, {pruning_str}").as_str(), |b| {
            b.iter(|| {
                for (start, goal) in &queries {
                    black_box(pathfinder.search(*start, *goal).ok());
                }
            })
        });
    }
}

fn component_bench(c: &mut Criterion) {
    let grid = OccupancyGrid::new(256, 256, false);
    c.bench_function("components 256x256", |b| {
        b.iter(|| black_box(ComponentMap::new(&grid)))
    });
}

criterion_group!(benches, scenario_bench, random_grid_bench, component_bench);
criterion_main!(benches);
