//! Turns a road network into an [OccupancyGrid]: every cell starts out blocked and each road
//! segment is drawn as a line of free cells.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use petgraph::graph::UnGraph;
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::{PointsError, RasterError};
use crate::occupancy_grid::OccupancyGrid;

/// A position in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint { lat, lon }
    }

    fn distance_squared(&self, other: &GeoPoint) -> f64 {
        (self.lat - other.lat).powi(2) + (self.lon - other.lon).powi(2)
    }
}

/// Undirected road graph; edges carry no data, their geometry is the straight segment between
/// the two nodes.
pub type RoadNetwork = UnGraph<GeoPoint, ()>;

/// Maps between degrees and grid cells. Rows follow latitude and columns longitude, both
/// counted from `origin` in steps of `1 / resolution` degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridProjection {
    pub origin: GeoPoint,
    /// Cells per degree.
    pub resolution: f64,
}

impl GridProjection {
    /// The cell containing `point`. Not clamped: points past the far edge of the rasterized
    /// extent map outside the grid.
    pub fn to_cell(&self, point: GeoPoint) -> Coordinate {
        Coordinate::new(
            ((point.lat - self.origin.lat) * self.resolution) as i32,
            ((point.lon - self.origin.lon) * self.resolution) as i32,
        )
    }

    /// Like [to_cell](Self::to_cell) but clamped into `grid`.
    pub fn to_cell_in(&self, point: GeoPoint, grid: &OccupancyGrid) -> Coordinate {
        let cell = self.to_cell(point);
        Coordinate::new(
            clamp_index(cell.row, grid.height()),
            clamp_index(cell.col, grid.width()),
        )
    }

    /// The south-west corner of `cell` in degrees.
    pub fn to_geo(&self, cell: Coordinate) -> GeoPoint {
        GeoPoint::new(
            cell.row as f64 / self.resolution + self.origin.lat,
            cell.col as f64 / self.resolution + self.origin.lon,
        )
    }
}

fn clamp_index(value: i32, len: usize) -> i32 {
    value.clamp(0, len as i32 - 1)
}

/// `samples` evenly spaced values from `from` to `to`, both included, truncated to cells.
fn linspace(from: i32, to: i32, samples: i32) -> impl Iterator<Item = i32> {
    let span = (to - from) as f64;
    (0..samples).map(move |i| {
        if samples == 1 {
            from
        } else {
            (from as f64 + span * i as f64 / (samples - 1) as f64) as i32
        }
    })
}

/// Rasterizes `network` at `resolution` cells per degree. The grid spans the bounding box of
/// the nodes; cells on the far edge of the box are clamped into the last row or column.
pub fn rasterize(
    network: &RoadNetwork,
    resolution: f64,
) -> Result<(OccupancyGrid, GridProjection), RasterError> {
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(RasterError::InvalidResolution(resolution));
    }
    let mut weights = network.node_weights();
    let first = *weights.next().ok_or(RasterError::EmptyNetwork)?;
    let (min, max) = weights.fold((first, first), |(min, max), p| {
        (
            GeoPoint::new(min.lat.min(p.lat), min.lon.min(p.lon)),
            GeoPoint::new(max.lat.max(p.lat), max.lon.max(p.lon)),
        )
    });
    let height = ((max.lat - min.lat) * resolution) as usize;
    let width = ((max.lon - min.lon) * resolution) as usize;
    if height == 0 || width == 0 {
        return Err(RasterError::DegenerateExtent { height, width });
    }

    let projection = GridProjection {
        origin: min,
        resolution,
    };
    let mut grid = OccupancyGrid::new(height, width, true);
    for edge in network.raw_edges() {
        let from = projection.to_cell(network[edge.source()]);
        let to = projection.to_cell(network[edge.target()]);
        let samples = (to.row - from.row).abs().max((to.col - from.col).abs()) + 1;
        for (row, col) in linspace(from.row, to.row, samples).zip(linspace(from.col, to.col, samples))
        {
            grid.set(
                Coordinate::new(clamp_index(row, height), clamp_index(col, width)),
                false,
            );
        }
    }
    info!(
        "Rasterized {} nodes and {} edges into a {}x{} grid with {} free cells",
        network.node_count(),
        network.edge_count(),
        height,
        width,
        grid.walkable_count()
    );
    Ok((grid, projection))
}

/// The network node closest to `point` (squared distance in degrees), or [None] for an empty
/// network.
pub fn snap_to_nearest_node(network: &RoadNetwork, point: GeoPoint) -> Option<GeoPoint> {
    network
        .node_weights()
        .min_by(|a, b| {
            a.distance_squared(&point)
                .partial_cmp(&b.distance_squared(&point))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .copied()
}

/// Named points of interest, as a JSON object of `{"name": {"lat": .., "lon": ..}}`.
pub type BenchmarkPoints = BTreeMap<String, GeoPoint>;

/// Parses named benchmark points. Blank input is an error rather than an empty set.
pub fn parse_benchmark_points(json: &str) -> Result<BenchmarkPoints, PointsError> {
    if json.trim().is_empty() {
        return Err(PointsError::Empty);
    }
    Ok(serde_json::from_str(json)?)
}

/// Reads named benchmark points from a JSON file.
pub fn load_benchmark_points(path: impl AsRef<Path>) -> Result<BenchmarkPoints, PointsError> {
    let points = parse_benchmark_points(&fs::read_to_string(path.as_ref())?)?;
    info!(
        "Loaded {} benchmark points from {}",
        points.len(),
        path.as_ref().display()
    );
    Ok(points)
}
