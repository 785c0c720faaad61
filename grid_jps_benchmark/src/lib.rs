//! Loads [Moving AI](https://movingai.com/benchmarks/grids.html) style benchmarks: a `.map`
//! character grid under `maps/` and a tab separated `.map.scen` scenario list under
//! `scenarios/`, both addressed by the same relative name such as `demo/walls`.
use csv::ReaderBuilder;
use grid_jps::error::GridError;
use grid_jps::{Coordinate, OccupancyGrid};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed map header: {0}")]
    Header(String),
    #[error("invalid map body: {0}")]
    Grid(#[from] GridError),
    #[error("map is {found_height}x{found_width}, header says {height}x{width}")]
    SizeMismatch {
        height: usize,
        width: usize,
        found_height: usize,
        found_width: usize,
    },
    #[error("invalid scenario record: {0}")]
    Scenario(#[from] csv::Error),
    #[error("could not list benchmarks: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("unknown benchmark {0}")]
    Unknown(String),
}

/// One line of a scenario file. Moving AI files put `x` (column) before `y` (row).
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Scenario {
    pub bucket: u32,
    pub map: String,
    pub width: u32,
    pub height: u32,
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    /// Optimal octile distance.
    pub distance: f64,
}

impl Scenario {
    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.y1 as i32, self.x1 as i32)
    }

    pub fn goal(&self) -> Coordinate {
        Coordinate::new(self.y2 as i32, self.x2 as i32)
    }
}

pub struct Benchmark {
    pub name: String,
    pub grid: OccupancyGrid,
    pub scenarios: Vec<Scenario>,
}

fn read(path: &Path) -> Result<String, BenchmarkError> {
    fs::read_to_string(path).map_err(|source| BenchmarkError::Io {
        path: path.to_owned(),
        source,
    })
}

fn header_value(line: Option<&str>, key: &str) -> Result<usize, BenchmarkError> {
    let line = line.ok_or_else(|| BenchmarkError::Header(format!("missing {key}")))?;
    match line.split_once(' ') {
        Some((k, value)) if k == key => value
            .trim()
            .parse()
            .map_err(|_| BenchmarkError::Header(line.to_owned())),
        _ => Err(BenchmarkError::Header(line.to_owned())),
    }
}

/// Parses the contents of a `.map` file.
pub fn parse_map(contents: &str) -> Result<OccupancyGrid, BenchmarkError> {
    let mut lines = contents.lines();
    // type octile
    lines.next();
    let height = header_value(lines.next(), "height")?;
    let width = header_value(lines.next(), "width")?;
    if lines.next().map(str::trim) != Some("map") {
        return Err(BenchmarkError::Header("missing map marker".to_owned()));
    }
    let body = lines.collect::<Vec<_>>().join("\n");
    let grid: OccupancyGrid = body.parse()?;
    if grid.height() != height || grid.width() != width {
        return Err(BenchmarkError::SizeMismatch {
            height,
            width,
            found_height: grid.height(),
            found_width: grid.width(),
        });
    }
    Ok(grid)
}

/// Parses the contents of a `.map.scen` file, skipping its version line.
pub fn parse_scenarios(contents: &str) -> Result<Vec<Scenario>, BenchmarkError> {
    let records = contents.split_once('\n').map_or("", |(_, rest)| rest);
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_reader(records.as_bytes());
    Ok(csv_reader
        .deserialize()
        .collect::<Result<Vec<Scenario>, csv::Error>>()?)
}

/// Relative names (without extension) of every map under `root/maps`.
pub fn get_benchmark_names(root: &Path) -> Result<Vec<String>, BenchmarkError> {
    let maps = root.join("maps");
    let mut names = Vec::new();
    for entry in WalkDir::new(&maps).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel_path) = entry.path().strip_prefix(&maps) else {
            continue;
        };
        if let Some(name) = rel_path
            .to_str()
            .and_then(|path| path.strip_suffix(".map"))
        {
            names.push(name.replace('\\', "/"));
        }
    }
    Ok(names)
}

/// Loads `root/maps/{name}.map` together with `root/scenarios/{name}.map.scen`.
pub fn load_benchmark(root: &Path, name: &str) -> Result<Benchmark, BenchmarkError> {
    if !get_benchmark_names(root)?.iter().any(|known| known == name) {
        return Err(BenchmarkError::Unknown(name.to_owned()));
    }
    let grid = parse_map(&read(&root.join("maps").join(format!("{name}.map")))?)?;
    let scenarios =
        parse_scenarios(&read(&root.join("scenarios").join(format!("{name}.map.scen")))?)?;
    Ok(Benchmark {
        name: name.to_owned(),
        grid,
        scenarios,
    })
}
