//! `CostGridV1`: in-memory weighted grid implementing the map provider
//! contract.
//!
//! Cells are stored row-major. A negative cell cost is impassable. Rendering
//! appends a text frame to an in-memory list; nothing touches the
//! filesystem.
//!
//! # Frame alphabet
//!
//! | char | meaning                         |
//! |------|---------------------------------|
//! | `S`  | start                           |
//! | `G`  | goal                            |
//! | `*`  | cell marked as on the path      |
//! | `#`  | impassable (negative cost)      |
//! | `0-9`| traversal cost                  |
//! | `+`  | traversal cost above 9          |

use std::collections::BTreeSet;

use gridwalk_kernel::grid::Position;
use gridwalk_search::contract::{MapError, MapProviderV1};

use crate::contract::ReportableMapV1;

/// Error constructing a [`CostGridV1`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero.
    Empty,
    /// `cells.len()` does not equal `width * height`.
    CellCountMismatch { expected: usize, found: usize },
    /// A row in row-list form has a different length than the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Start or goal lies outside the grid.
    EndpointOutOfBounds {
        endpoint: &'static str,
        position: Position,
    },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has no cells"),
            Self::CellCountMismatch { expected, found } => {
                write!(f, "expected {expected} cells, found {found}")
            }
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::EndpointOutOfBounds { endpoint, position } => {
                write!(f, "{endpoint} position {position} is outside the grid")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A weighted grid map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGridV1 {
    map_id: String,
    width: usize,
    height: usize,
    cells: Vec<i64>,
    start: Position,
    goal: Position,
    marked: BTreeSet<Position>,
    frames: Vec<String>,
}

impl CostGridV1 {
    /// Build a grid from a row-major cell vector.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the dimensions are empty, the cell count is
    /// wrong, or start/goal are out of bounds.
    pub fn new(
        map_id: impl Into<String>,
        width: usize,
        height: usize,
        cells: Vec<i64>,
        start: Position,
        goal: Position,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        let expected = width.checked_mul(height).ok_or(GridError::CellCountMismatch {
            expected: usize::MAX,
            found: cells.len(),
        })?;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }
        let grid = Self {
            map_id: map_id.into(),
            width,
            height,
            cells,
            start,
            goal,
            marked: BTreeSet::new(),
            frames: Vec::new(),
        };
        for (endpoint, position) in [("start", start), ("goal", goal)] {
            if grid.index(position).is_none() {
                return Err(GridError::EndpointOutOfBounds { endpoint, position });
            }
        }
        Ok(grid)
    }

    /// Build a grid from a list of equal-length rows.
    ///
    /// # Errors
    ///
    /// Same as [`CostGridV1::new`], plus [`GridError::RaggedRow`].
    pub fn from_rows(
        map_id: impl Into<String>,
        rows: &[&[i64]],
        start: Position,
        goal: Position,
    ) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |r| r.len());
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }
        let cells = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::new(map_id, width, rows.len(), cells, start, goal)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell costs, including any path markers written so far.
    #[must_use]
    pub fn cells(&self) -> &[i64] {
        &self.cells
    }

    /// Positions flagged through `mark_path_cell`, row-major.
    #[must_use]
    pub fn marked(&self) -> &BTreeSet<Position> {
        &self.marked
    }

    /// Every frame produced by `render`, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    fn index(&self, position: Position) -> Option<usize> {
        let (row, col) = position.to_indices()?;
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    fn cell_char(&self, position: Position, cost: i64) -> char {
        if position == self.start {
            'S'
        } else if position == self.goal {
            'G'
        } else if self.marked.contains(&position) {
            '*'
        } else if cost < 0 {
            '#'
        } else {
            u32::try_from(cost)
                .ok()
                .and_then(|c| char::from_digit(c, 10))
                .unwrap_or('+')
        }
    }

    fn frame_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for (idx, &cost) in self.cells.iter().enumerate() {
            let row = idx / self.width;
            let col = idx % self.width;
            let position = Position::new(
                i64::try_from(row).unwrap_or(i64::MAX),
                i64::try_from(col).unwrap_or(i64::MAX),
            );
            out.push(self.cell_char(position, cost));
            if col + 1 == self.width {
                out.push('\n');
            }
        }
        out
    }
}

impl MapProviderV1 for CostGridV1 {
    fn map_id(&self) -> &str {
        &self.map_id
    }

    fn cost(&self, position: Position) -> Result<i64, MapError> {
        self.index(position)
            .map(|idx| self.cells[idx])
            .ok_or(MapError::OutOfBounds { position })
    }

    fn start_position(&self) -> Position {
        self.start
    }

    fn goal_position(&self) -> Position {
        self.goal
    }

    fn mark_path_cell(&mut self, position: Position, marker: i64) -> Result<(), MapError> {
        let idx = self.index(position).ok_or(MapError::OutOfBounds { position })?;
        self.cells[idx] = marker;
        self.marked.insert(position);
        Ok(())
    }

    fn render(&mut self) -> Result<(), MapError> {
        let frame = self.frame_text();
        self.frames.push(frame);
        Ok(())
    }
}

impl ReportableMapV1 for CostGridV1 {
    fn snapshot_json(&self) -> serde_json::Value {
        serde_json::json!({
            "cells": self.cells,
            "goal": {"col": self.goal.col, "row": self.goal.row},
            "height": self.height,
            "map_id": self.map_id,
            "schema_version": "cost_grid.v1",
            "start": {"col": self.start.col, "row": self.start.row},
            "width": self.width,
        })
    }

    fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}
