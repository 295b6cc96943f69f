//! Minimal in-crate map provider for unit tests.

use gridwalk_kernel::grid::Position;

use crate::contract::{MapError, MapProviderV1};

pub(crate) struct VecGrid {
    width: usize,
    height: usize,
    cells: Vec<i64>,
    start: Position,
    goal: Position,
    pub(crate) marks: Vec<(Position, i64)>,
    pub(crate) renders: usize,
}

impl VecGrid {
    pub(crate) fn from_rows(rows: &[&[i64]], start: (i64, i64), goal: (i64, i64)) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        Self {
            width,
            height,
            cells: rows.iter().flat_map(|r| r.iter().copied()).collect(),
            start: Position::new(start.0, start.1),
            goal: Position::new(goal.0, goal.1),
            marks: Vec::new(),
            renders: 0,
        }
    }

    pub(crate) fn uniform(
        height: usize,
        width: usize,
        cost: i64,
        start: (i64, i64),
        goal: (i64, i64),
    ) -> Self {
        Self {
            width,
            height,
            cells: vec![cost; width * height],
            start: Position::new(start.0, start.1),
            goal: Position::new(goal.0, goal.1),
            marks: Vec::new(),
            renders: 0,
        }
    }

    fn index(&self, position: Position) -> Result<usize, MapError> {
        match position.to_indices() {
            Some((row, col)) if row < self.height && col < self.width => Ok(row * self.width + col),
            _ => Err(MapError::OutOfBounds { position }),
        }
    }
}

impl MapProviderV1 for VecGrid {
    fn map_id(&self) -> &str {
        "vec_grid"
    }

    fn cost(&self, position: Position) -> Result<i64, MapError> {
        self.index(position).map(|idx| self.cells[idx])
    }

    fn start_position(&self) -> Position {
        self.start
    }

    fn goal_position(&self) -> Position {
        self.goal
    }

    fn mark_path_cell(&mut self, position: Position, marker: i64) -> Result<(), MapError> {
        let idx = self.index(position)?;
        self.cells[idx] = marker;
        self.marks.push((position, marker));
        Ok(())
    }

    fn render(&mut self) -> Result<(), MapError> {
        self.renders += 1;
        Ok(())
    }
}
