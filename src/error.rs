use core::fmt;
use thiserror::Error;

use crate::coordinate::Coordinate;

/// Which end of a query an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Failures of a single search call. An exhausted frontier is not one of them: it is
/// reported as a missing path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("{endpoint} {coordinate} lies outside the {height}x{width} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        coordinate: Coordinate,
        height: usize,
        width: usize,
    },
    #[error("{endpoint} {coordinate} is an obstacle cell")]
    Blocked {
        endpoint: Endpoint,
        coordinate: Coordinate,
    },
    #[error("search gave up after {limit} expansions")]
    BudgetExhausted { limit: usize },
}

/// Errors raised while building an [OccupancyGrid](crate::OccupancyGrid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown map character {ch:?} at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },
}

/// Errors raised while rasterizing a road network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    #[error("road network has no nodes")]
    EmptyNetwork,
    #[error("resolution must be positive and finite, got {0}")]
    InvalidResolution(f64),
    #[error("road network extent rasterizes to an empty {height}x{width} grid")]
    DegenerateExtent { height: usize, width: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not parse search configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised while loading named benchmark points.
#[derive(Debug, Error)]
pub enum PointsError {
    #[error("could not read benchmark points: {0}")]
    Io(#[from] std::io::Error),
    #[error("benchmark points file is empty")]
    Empty,
    #[error("could not parse benchmark points: {0}")]
    Json(#[from] serde_json::Error),
}
