use crate::{
    draw::{ImDraw, Rgba},
    generators::{DfsGenerator, UniformSource},
    window::Window,
};

/// Draws one frame of the generation: the maze as it stands, the current cell, then
/// advances the generator before presenting.
#[derive(Debug)]
pub struct Renderer {
    imdraw: ImDraw,
    wall_size: f32,
    background: Rgba,
}

impl Renderer {
    pub fn new(wall_size: f32) -> Self {
        Renderer {
            imdraw: ImDraw::new(),
            wall_size,
            background: Rgba::GRAY,
        }
    }

    /// Renders a frame and runs up to `steps` generator steps in it.
    /// With `steps == 0` the current cell is still highlighted but the generator stays put.
    pub fn render_frame<W, R>(
        &mut self,
        window: &mut W,
        generator: &mut DfsGenerator,
        rng: &mut R,
        steps: usize,
    ) -> std::io::Result<()>
    where
        W: Window + ?Sized,
        R: UniformSource + ?Sized,
    {
        window.clear(self.background);
        self.imdraw.clear();

        generator.maze().draw(&mut self.imdraw, self.wall_size);
        if steps == 0 {
            generator.highlight_current(&mut self.imdraw, self.wall_size);
        } else {
            generator.advance(rng, &mut self.imdraw, self.wall_size);
            for _ in 1..steps {
                if generator.is_done() {
                    break;
                }
                generator.step(rng);
            }
        }

        self.imdraw.flush_to(window);
        window.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::{RngSource, get_rng},
        maze::Maze,
        window::HeadlessWindow,
    };

    #[test]
    fn test_frame_draws_walls_then_highlight() {
        let mut renderer = Renderer::new(40.0);
        let mut window = HeadlessWindow::new();
        let mut generator = DfsGenerator::new(Maze::new(2, 2), 50);
        let mut rng = RngSource::new(get_rng(Some(3)).unwrap());

        renderer
            .render_frame(&mut window, &mut generator, &mut rng, 1)
            .unwrap();
        // 4 cells x 4 walls, no visited overlay yet, plus the highlight
        assert_eq!(window.shapes_drawn(), 17);
        assert_eq!(window.frames(), 1);
        assert_eq!(generator.steps(), 1);
    }

    #[test]
    fn test_paused_frame_does_not_step() {
        let mut renderer = Renderer::new(40.0);
        let mut window = HeadlessWindow::new();
        let mut generator = DfsGenerator::new(Maze::new(3, 3), 50);
        let mut rng = RngSource::new(get_rng(Some(3)).unwrap());

        renderer
            .render_frame(&mut window, &mut generator, &mut rng, 0)
            .unwrap();
        assert_eq!(generator.steps(), 0);
        assert_eq!(window.shapes_drawn(), 9 * 4 + 1);
    }

    #[test]
    fn test_multiple_steps_per_frame() {
        let mut renderer = Renderer::new(40.0);
        let mut window = HeadlessWindow::new();
        let mut generator = DfsGenerator::new(Maze::new(1, 3), 50);
        let mut rng = RngSource::new(get_rng(Some(3)).unwrap());

        renderer
            .render_frame(&mut window, &mut generator, &mut rng, 100)
            .unwrap();
        // 2 carves, 2 backtracks, 1 final step
        assert!(generator.is_done());
        assert_eq!(generator.steps(), 5);
    }
}
