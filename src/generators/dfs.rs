use crate::{
    draw::Canvas,
    generators::{BacktrackStack, UniformSource},
    maze::{Maze, MazeError},
};

/// What a single generator step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved into an unvisited neighbor, carving the wall between the two cells.
    Carved { from: usize, to: usize },
    /// No unvisited neighbor: returned to the most recent branch point.
    Backtracked { to: usize },
    /// The stack ran dry and nothing is left to visit. Generation ends with this step.
    Finished,
    /// Generation had already finished; nothing changed.
    Idle,
}

/// Iterative randomized depth-first search, advanced one step at a time so that
/// the carving can be animated.
#[derive(Debug, Clone)]
pub struct DfsGenerator {
    maze: Maze,
    stack: BacktrackStack,
    /// Index of the cell the search is standing on
    current: usize,
    done: bool,
    /// Number of steps that changed state
    steps: usize,
}

impl DfsGenerator {
    /// Starts a generation at the first cell of the maze.
    pub fn new(maze: Maze, stack_capacity: usize) -> Self {
        DfsGenerator {
            maze,
            stack: BacktrackStack::with_capacity(stack_capacity),
            current: 0,
            done: false,
            steps: 0,
        }
    }

    /// Starts a generation at the given cell.
    pub fn with_start(
        maze: Maze,
        col: isize,
        row: isize,
        stack_capacity: usize,
    ) -> Result<Self, MazeError> {
        let start = maze
            .index(col, row)
            .ok_or(MazeError::OutOfBounds { col, row })?;
        let mut generator = DfsGenerator::new(maze, stack_capacity);
        generator.current = start;
        Ok(generator)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn into_maze(self) -> Maze {
        self.maze
    }

    /// Index of the current cell.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn stack(&self) -> &BacktrackStack {
        &self.stack
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Draws the highlight overlay over the current cell.
    pub fn highlight_current<C: Canvas + ?Sized>(&self, canvas: &mut C, wall_size: f32) {
        self.maze[self.current].highlight(canvas, wall_size);
    }

    /// One animated step: mark the current cell visited, highlight it, then advance the search.
    pub fn advance<R, C>(&mut self, rng: &mut R, canvas: &mut C, wall_size: f32) -> StepOutcome
    where
        R: UniformSource + ?Sized,
        C: Canvas + ?Sized,
    {
        self.maze.visit(self.current);
        self.highlight_current(canvas, wall_size);
        self.step(rng)
    }

    /// Advances the search by one step.
    ///
    /// If the current cell has unvisited neighbors one of them is picked uniformly at random,
    /// the current cell is pushed, the wall between them is removed and the search moves on.
    /// Otherwise the search backtracks to the last pushed cell. With nothing left to pop the
    /// generation is finished and later steps are no-ops.
    pub fn step<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> StepOutcome {
        if self.done {
            return StepOutcome::Idle;
        }
        self.steps += 1;
        self.maze.visit(self.current);

        let neighbors = self.maze.unvisited_neighbors(self.current);
        let outcome = if !neighbors.is_empty() {
            let chosen = neighbors[rng.uniform_int(neighbors.len())];
            let from = self.current;
            self.stack.push(from);
            self.maze.remove_walls(from, chosen);
            self.maze.visit(chosen);
            self.current = chosen;
            StepOutcome::Carved { from, to: chosen }
        } else if let Some(previous) = self.stack.pop() {
            // Backtracking never touches walls
            self.current = previous;
            StepOutcome::Backtracked { to: previous }
        } else {
            self.done = true;
            tracing::info!(
                steps = self.steps,
                cells = self.maze.len(),
                "Maze generation finished"
            );
            StepOutcome::Finished
        };
        tracing::trace!(?outcome, stack = self.stack.len(), "DFS step");
        outcome
    }

    /// Runs the search to completion and returns how many steps it took.
    pub fn generate<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> usize {
        let start = self.steps;
        while self.step(rng) != StepOutcome::Idle {}
        self.steps - start
    }
}
