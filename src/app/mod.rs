mod clock;
mod renderer;

pub use clock::{FpsCounter, FrameClock, ImmediateClock, TickClock};
pub use renderer::Renderer;

use crate::{
    generators::{DfsGenerator, UniformSource},
    maze::Maze,
    window::{UserAction, Window},
};

/// What a run of the frame loop did, reported once the window closes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames presented
    pub frames: usize,
    /// Frame during which generation finished, if it did
    pub finished_at_frame: Option<usize>,
    /// Generator steps taken
    pub steps: usize,
    /// Passages carved
    pub passages: usize,
}

pub struct App {
    /// Side of a cell on the drawing surface, in pixels
    pub wall_size: u32,
    /// Drawing surface width in pixels
    pub screen_width: u32,
    /// Drawing surface height in pixels
    pub screen_height: u32,
    /// Initial capacity of the backtrack stack
    pub stack_capacity: usize,
    /// Frames per second the loop is paced at
    pub target_fps: u32,
    /// Window title, the measured FPS gets appended to it
    pub title: String,
    /// Generator steps per frame; changed at runtime with the speed keys
    pub steps_per_frame: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            wall_size: 40,
            screen_width: 800,
            screen_height: 800,
            stack_capacity: 50,
            target_fps: 60,
            title: "Maze Generator".to_string(),
            steps_per_frame: 1,
        }
    }
}

impl App {
    /// Upper bound for steps per frame
    pub const MAX_STEPS_PER_FRAME: usize = 64;

    /// Default settings with the surface sized for a `cols` by `rows` grid.
    pub fn with_grid(cols: u32, rows: u32) -> Self {
        let app = App::default();
        App {
            screen_width: cols * app.wall_size,
            screen_height: rows * app.wall_size,
            ..app
        }
    }

    /// Number of grid columns that fit the surface.
    pub fn columns(&self) -> usize {
        (self.screen_width / self.wall_size.max(1)) as usize
    }

    /// Number of grid rows that fit the surface.
    pub fn rows(&self) -> usize {
        (self.screen_height / self.wall_size.max(1)) as usize
    }

    /// Main frame loop.
    ///
    /// Every frame renders the maze, advances the generator and presents, then waits for the
    /// next clock tick. The window title shows the measured FPS, refreshed once a second.
    /// The loop keeps showing the finished maze until the window is closed.
    pub fn run<W, C, R>(
        &self,
        window: &mut W,
        clock: &mut C,
        rng: &mut R,
    ) -> std::io::Result<RunSummary>
    where
        W: Window + ?Sized,
        C: FrameClock + ?Sized,
        R: UniformSource + ?Sized,
    {
        let (cols, rows) = (self.columns(), self.rows());
        if cols == 0 || rows == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "A {}x{} surface cannot hold a single {}px cell",
                    self.screen_width, self.screen_height, self.wall_size
                ),
            ));
        }

        let mut generator = DfsGenerator::new(Maze::new(cols, rows), self.stack_capacity);
        let mut renderer = Renderer::new(self.wall_size as f32);
        let mut fps = FpsCounter::default();
        let mut steps_per_frame = self.steps_per_frame.clamp(1, App::MAX_STEPS_PER_FRAME);
        let mut paused = false;
        let mut summary = RunSummary::default();

        window.set_title(&self.title)?;
        tracing::info!(cols, rows, "Started frame loop");

        while !window.closed()? {
            for action in window.take_actions() {
                match action {
                    UserAction::TogglePause => paused = !paused,
                    UserAction::SpeedUp => {
                        steps_per_frame = (steps_per_frame * 2).min(App::MAX_STEPS_PER_FRAME)
                    }
                    UserAction::SlowDown => steps_per_frame = (steps_per_frame / 2).max(1),
                }
                tracing::debug!(?action, paused, steps_per_frame, "User action");
            }

            let was_done = generator.is_done();
            let steps = if paused { 0 } else { steps_per_frame };
            renderer.render_frame(window, &mut generator, rng, steps)?;
            summary.frames += 1;
            if !was_done && generator.is_done() {
                summary.finished_at_frame = Some(summary.frames);
            }

            clock.wait_for_tick();
            if let Some(rate) = fps.tick(clock.second_elapsed()) {
                window.set_title(&format!("{} | FPS: {}", self.title, rate))?;
            }
        }

        summary.steps = generator.steps();
        summary.passages = generator.maze().carved_passages().len();
        tracing::info!(?summary, "Exiting frame loop");
        Ok(summary)
    }
}
