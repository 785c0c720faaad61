use core::fmt;
use std::str::FromStr;

use crate::coordinate::Coordinate;
use crate::error::GridError;

/// A rectangular binary map in which `true` marks an obstacle. Cells are stored row-major.
///
/// The grid is only ever read during a search, so a single instance can be shared by
/// reference between any number of concurrent searches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyGrid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Creates a `height` by `width` grid with every cell set to `blocked`.
    pub fn new(height: usize, width: usize, blocked: bool) -> OccupancyGrid {
        OccupancyGrid {
            height,
            width,
            cells: vec![blocked; height * width],
        }
    }

    /// Builds a grid from rows of obstacle flags. All rows must have the same length.
    pub fn from_rows<R, I>(rows: R) -> Result<OccupancyGrid, GridError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = bool>,
    {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;
        for (row, values) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(values);
            let found = cells.len() - before;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::RaggedRow {
                        row,
                        expected,
                        found,
                    })
                }
                Some(_) => {}
            }
            height += 1;
        }
        match width {
            Some(width) if width > 0 => Ok(OccupancyGrid {
                height,
                width,
                cells,
            }),
            _ => Err(GridError::Empty),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn in_bounds(&self, pos: Coordinate) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    fn index(&self, pos: Coordinate) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.width + pos.col as usize)
        } else {
            None
        }
    }

    /// Obstacle flag of a cell, or [None] outside the grid.
    pub fn get(&self, pos: Coordinate) -> Option<bool> {
        self.index(pos).map(|ix| self.cells[ix])
    }

    /// A cell is walkable if it is inside the grid and not an obstacle.
    #[inline]
    pub fn walkable(&self, pos: Coordinate) -> bool {
        matches!(self.get(pos), Some(false))
    }

    /// Sets a single cell. Positions outside the grid are ignored and reported as [false].
    pub fn set(&mut self, pos: Coordinate, blocked: bool) -> bool {
        match self.index(pos) {
            Some(ix) => {
                self.cells[ix] = blocked;
                true
            }
            None => false,
        }
    }

    /// Sets every in-bounds cell of the `rows` by `cols` rectangle whose top-left corner
    /// is `corner`.
    pub fn set_rect(&mut self, corner: Coordinate, rows: usize, cols: usize, blocked: bool) {
        for row in corner.row..corner.row + rows as i32 {
            for col in corner.col..corner.col + cols as i32 {
                self.set(Coordinate::new(row, col), blocked);
            }
        }
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|blocked| !**blocked).count()
    }

    /// All coordinates of the grid in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.height as i32)
            .flat_map(move |row| (0..self.width as i32).map(move |col| Coordinate::new(row, col)))
    }
}

impl FromStr for OccupancyGrid {
    type Err = GridError;

    /// Parses a character map, one row per line. `.`, `0`, `G` and `S` are free;
    /// `#`, `1`, `@`, `O`, `T` and `W` are obstacles. Blank lines are skipped.
    fn from_str(s: &str) -> Result<OccupancyGrid, GridError> {
        let rows = s
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| match ch {
                        '.' | '0' | 'G' | 'S' => Ok(false),
                        '#' | '1' | '@' | 'O' | 'T' | 'W' => Ok(true),
                        _ => Err(GridError::UnknownCell { ch, row, col }),
                    })
                    .collect::<Result<Vec<bool>, GridError>>()
            })
            .collect::<Result<Vec<Vec<bool>>, GridError>>()?;
        OccupancyGrid::from_rows(rows)
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line = row
                .iter()
                .map(|&blocked| if blocked { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
