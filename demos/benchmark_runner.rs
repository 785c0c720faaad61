use grid_jps::report::PathReport;
use grid_jps::{run_batch, Pathfinder, Pruning, SearchConfig};
use grid_jps_benchmark::*;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

fn main() -> Result<(), BenchmarkError> {
    env_logger::init();
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let threads = std::thread::available_parallelism().map_or(1, |n| n.get());
    let mut total_time = Duration::ZERO;
    for name in get_benchmark_names(root)? {
        println!("Benchmark name: {}", name);
        let benchmark = load_benchmark(root, &name)?;
        let queries: Vec<_> = benchmark
            .scenarios
            .iter()
            .map(|scenario| (scenario.start(), scenario.goal()))
            .collect();
        for pruning in [Pruning::Natural, Pruning::ForcedNeighbours] {
            let pathfinder =
                Pathfinder::with_config(&benchmark.grid, SearchConfig::new().with_pruning(pruning));
            let before = Instant::now();
            let results = run_batch(&pathfinder, &queries, threads);
            let elapsed = before.elapsed();
            let found = results.iter().filter(|r| matches!(r, Ok(Some(_)))).count();
            println!(
                "\t{:?}: {}/{} paths; elapsed time: {:.2?}; per scenario: {:.2?}",
                pruning,
                found,
                queries.len(),
                elapsed,
                elapsed / queries.len().max(1) as u32
            );
            total_time += elapsed;
            if pruning == Pruning::ForcedNeighbours {
                if let Some(((start, goal), Ok(Some(path)))) = queries.iter().zip(results).next() {
                    let report = PathReport::new(format!("{name} #1"), *start, *goal, path);
                    report
                        .write_log(io::stdout().lock())
                        .map_err(|source| BenchmarkError::Io {
                            path: "stdout".into(),
                            source,
                        })?;
                }
            }
        }
    }
    println!("\tTotal benchmark time: {:.2?}", total_time);
    Ok(())
}
