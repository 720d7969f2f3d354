pub mod cell;

use std::fmt;

pub use cell::{Cell, Direction};

use crate::draw::Canvas;

/// Errors raised by lookups that require a cell to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    OutOfBounds { col: isize, row: isize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::OutOfBounds { col, row } => {
                write!(f, "cell ({}, {}) is outside the maze", col, row)
            }
        }
    }
}

impl std::error::Error for MazeError {}

/// A rectangular grid of cells stored row-major: the cell at column `i`, row `j` lives at `i + j * cols`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: Box<[Cell]>,
    cols: usize,
    rows: usize,
}

impl Maze {
    /// Creates a maze where every cell is closed and unvisited.
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn new(cols: usize, rows: usize) -> Self {
        if cols == 0 || rows == 0 {
            panic!("Maze dimensions must be positive, got {}x{}", cols, rows);
        }
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(col, row)))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Maze { cells, cols, rows }
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Maps a coordinate to its position in the cell sequence.
    /// Returns `None` when the coordinate falls outside the grid.
    pub fn index(&self, col: isize, row: isize) -> Option<usize> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.cols && row < self.rows).then(|| col + row * self.cols)
    }

    /// Returns the cell at the coordinate, or `None` when out of bounds.
    pub fn cell_at(&self, col: isize, row: isize) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Like [`Maze::cell_at`], for callers that need the cell to exist.
    pub fn cell(&self, col: isize, row: isize) -> Result<&Cell, MazeError> {
        self.cell_at(col, row)
            .ok_or(MazeError::OutOfBounds { col, row })
    }

    /// Index of the neighbor of cell `index` in `direction`, if there is one.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let cell = &self.cells[index];
        let (dx, dy) = direction.offset();
        self.index(cell.col() as isize + dx, cell.row() as isize + dy)
    }

    /// Unvisited neighbors of cell `index`, in top, right, bottom, left order.
    /// Out-of-bounds directions are skipped. An empty list means every neighbor has been visited.
    pub fn unvisited_neighbors(&self, index: usize) -> Vec<usize> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| self.neighbor(index, direction))
            .filter(|&n| !self.cells[n].is_visited())
            .collect()
    }

    /// Marks cell `index` as visited. Visiting an already visited cell has no effect.
    pub fn visit(&mut self, index: usize) {
        self.cells[index].mark_visited();
    }

    /// Carves a passage between two adjacent cells by clearing the wall each one shares with the other.
    ///
    /// # Panics
    /// If `a` and `b` are not direct (non-diagonal) neighbors.
    pub fn remove_walls(&mut self, a: usize, b: usize) {
        let (from, to) = (&self.cells[a], &self.cells[b]);
        let dx = from.col() as isize - to.col() as isize;
        let dy = from.row() as isize - to.row() as isize;
        // Direction that leads from `a` to `b`
        let direction = match (dx, dy) {
            (1, 0) => Direction::Left,
            (-1, 0) => Direction::Right,
            (0, 1) => Direction::Top,
            (0, -1) => Direction::Bottom,
            _ => panic!(
                "Cannot remove walls between non-adjacent cells ({}, {}) and ({}, {})",
                from.col(),
                from.row(),
                to.col(),
                to.row()
            ),
        };
        self.cells[a].clear_wall(direction);
        self.cells[b].clear_wall(direction.opposite());
    }

    /// Asks every cell to draw itself.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, wall_size: f32) {
        self.cells
            .iter()
            .for_each(|cell| cell.draw(canvas, wall_size));
    }

    /// Every carved passage as a pair of cell indices, each pair listed once.
    pub fn carved_passages(&self) -> Vec<(usize, usize)> {
        (0..self.cells.len())
            .flat_map(|i| {
                [Direction::Right, Direction::Bottom]
                    .into_iter()
                    .filter_map(move |direction| {
                        let n = self.neighbor(i, direction)?;
                        (!self.cells[i].has_wall(direction)).then_some((i, n))
                    })
            })
            .collect()
    }

    /// Whether the generator has been through every cell.
    pub fn is_fully_visited(&self) -> bool {
        self.cells.iter().all(Cell::is_visited)
    }
}

impl std::ops::Index<usize> for Maze {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}
