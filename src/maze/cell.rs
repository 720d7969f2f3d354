use crate::draw::{Canvas, EndCap, Point, Rgba};

/// Thickness of a wall line, in surface pixels.
pub const WALL_THICKNESS: f32 = 3.0;
/// Overlay drawn on top of every visited cell.
pub const VISITED_COLOR: Rgba = Rgba::rgb(0.5, 0.0, 1.0).with_alpha(0.35);
/// Overlay drawn on top of the generator's current cell.
pub const HIGHLIGHT_COLOR: Rgba = Rgba::rgb(0.3, 0.0, 0.0).with_alpha(0.45);

/// The four sides of a cell, in the order neighbors are inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Direction {
    /// All directions in lookup order: top, right, bottom, left.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// Grid offset `(dcol, drow)` of the neighbor in this direction.
    /// Rows grow downward, so `Top` is one row up.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Top => (0, -1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }
}

/// A single square of the maze: four walls, its position and whether the generator has been here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    walls: [bool; 4],
    col: usize,
    row: usize,
    visited: bool,
}

impl Cell {
    /// Creates an unvisited cell with all four walls standing.
    pub fn new(col: usize, row: usize) -> Self {
        Cell {
            walls: [true; 4],
            col,
            row,
            visited: false,
        }
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction as usize]
    }

    /// Wall flags in top, right, bottom, left order.
    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub(crate) fn clear_wall(&mut self, direction: Direction) {
        self.walls[direction as usize] = false;
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    /// Lower corner and upper corner of the cell on the drawing surface.
    fn bounds(&self, wall_size: f32) -> (Point, Point) {
        let x = self.col as f32 * wall_size;
        let y = self.row as f32 * wall_size;
        (Point::new(x, y), Point::new(x + wall_size, y + wall_size))
    }

    /// Draws every standing wall as a white line and, once visited, the visited overlay.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, wall_size: f32) {
        let (min, max) = self.bounds(wall_size);

        canvas.set_color(Rgba::WHITE);
        canvas.set_end_cap(EndCap::Sharp);
        for direction in Direction::ALL {
            if !self.has_wall(direction) {
                continue;
            }
            let (from, to) = match direction {
                Direction::Top => (Point::new(min.x, min.y), Point::new(max.x, min.y)),
                Direction::Right => (Point::new(max.x, min.y), Point::new(max.x, max.y)),
                Direction::Bottom => (Point::new(max.x, max.y), Point::new(min.x, max.y)),
                Direction::Left => (Point::new(min.x, max.y), Point::new(min.x, min.y)),
            };
            canvas.push(from);
            canvas.push(to);
            canvas.line(WALL_THICKNESS);
        }

        if self.visited {
            canvas.set_color(VISITED_COLOR);
            canvas.push(min);
            canvas.push(max);
            canvas.rectangle(0.0);
        }
    }

    /// Fills the cell with the highlight overlay.
    pub fn highlight<C: Canvas + ?Sized>(&self, canvas: &mut C, wall_size: f32) {
        let (min, max) = self.bounds(wall_size);
        canvas.set_color(HIGHLIGHT_COLOR);
        canvas.push(min);
        canvas.push(max);
        canvas.rectangle(0.0);
    }
}
