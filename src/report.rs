use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::coordinate::Coordinate;
use crate::path_cost;

/// Summary of one finished search, written as a plain text log or as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathReport {
    pub label: String,
    pub start: Coordinate,
    pub goal: Coordinate,
    pub waypoints: Vec<Coordinate>,
    /// Octile length of `waypoints`.
    pub length: f64,
}

impl PathReport {
    pub fn new(
        label: impl Into<String>,
        start: Coordinate,
        goal: Coordinate,
        waypoints: Vec<Coordinate>,
    ) -> PathReport {
        let length = path_cost(&waypoints);
        PathReport {
            label: label.into(),
            start,
            goal,
            waypoints,
            length,
        }
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Writes the text log: one line each for the label, the endpoints, the number of
    /// waypoints and the waypoints themselves.
    pub fn write_log<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "Benchmark {}", self.label)?;
        writeln!(writer, "Start: {}", self.start)?;
        writeln!(writer, "Goal: {}", self.goal)?;
        writeln!(writer, "Path length: {}", self.waypoint_count())?;
        let steps: Vec<String> = self.waypoints.iter().map(|c| c.to_string()).collect();
        writeln!(writer, "Grid steps: [{}]", steps.join(", "))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<PathReport> {
        serde_json::from_str(s)
    }
}
