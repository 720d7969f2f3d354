mod raster;

pub use raster::Framebuffer;

use crate::window::Window;

/// A color with straight (non-premultiplied) alpha. Channels are in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    /// Neutral gray used as the window background.
    pub const GRAY: Rgba = Rgba::rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);

    /// An opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Rgba { a, ..self }
    }

    /// Composites this color over an opaque destination color.
    pub fn over(self, dst: [f32; 3]) -> [f32; 3] {
        let a = self.a.clamp(0.0, 1.0);
        [
            self.r * a + dst[0] * (1.0 - a),
            self.g * a + dst[1] * (1.0 - a),
            self.b * a + dst[2] * (1.0 - a),
        ]
    }
}

/// A position on the drawing surface. The origin is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// How line segments end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EndCap {
    /// The stroke stops exactly at the end points.
    #[default]
    Flat,
    /// The stroke extends half its thickness past each end point, so perpendicular lines meet in a clean corner.
    Sharp,
}

/// A primitive recorded by [`ImDraw`] and rasterized by a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        thickness: f32,
        cap: EndCap,
        color: Rgba,
    },
    /// Axis-aligned rectangle. A thickness of zero means filled, anything else draws the outline.
    Rect {
        min: Point,
        max: Point,
        thickness: f32,
        color: Rgba,
    },
}

/// The drawing capabilities cells rely on. Anything that can record or render these
/// calls can stand in for the real drawer.
pub trait Canvas {
    fn set_color(&mut self, color: Rgba);
    /// Queues a vertex for the next shape.
    fn push(&mut self, point: Point);
    /// Strokes a polyline through the queued vertices.
    fn line(&mut self, thickness: f32);
    /// Draws a rectangle for every pair of queued vertices (opposite corners).
    fn rectangle(&mut self, thickness: f32);
    fn set_end_cap(&mut self, cap: EndCap);
}

/// Immediate-mode draw buffer: records shapes during a frame and hands them to a window on flush.
#[derive(Debug, Clone)]
pub struct ImDraw {
    color: Rgba,
    cap: EndCap,
    points: Vec<Point>,
    shapes: Vec<Shape>,
}

impl Default for ImDraw {
    fn default() -> Self {
        Self::new()
    }
}

impl ImDraw {
    pub fn new() -> Self {
        ImDraw {
            color: Rgba::BLACK,
            cap: EndCap::default(),
            points: Vec::new(),
            shapes: Vec::new(),
        }
    }

    /// Drops every recorded shape and pending vertex. Color and end cap are kept.
    pub fn clear(&mut self) {
        self.points.clear();
        self.shapes.clear();
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Hands every recorded shape to the window, in recording order.
    pub fn flush_to<W: Window + ?Sized>(&self, window: &mut W) {
        self.shapes.iter().for_each(|shape| window.draw(shape));
    }
}

impl Canvas for ImDraw {
    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    fn line(&mut self, thickness: f32) {
        let (color, cap) = (self.color, self.cap);
        self.shapes
            .extend(self.points.windows(2).map(|pair| Shape::Line {
                from: pair[0],
                to: pair[1],
                thickness,
                cap,
                color,
            }));
        self.points.clear();
    }

    fn rectangle(&mut self, thickness: f32) {
        let color = self.color;
        self.shapes
            .extend(self.points.chunks_exact(2).map(|pair| Shape::Rect {
                min: Point::new(pair[0].x.min(pair[1].x), pair[0].y.min(pair[1].y)),
                max: Point::new(pair[0].x.max(pair[1].x), pair[0].y.max(pair[1].y)),
                thickness,
                color,
            }));
        self.points.clear();
    }

    fn set_end_cap(&mut self, cap: EndCap) {
        self.cap = cap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::HeadlessWindow;

    #[test]
    fn test_line_strokes_polyline() {
        let mut imdraw = ImDraw::new();
        imdraw.set_color(Rgba::WHITE);
        imdraw.push(Point::new(0.0, 0.0));
        imdraw.push(Point::new(10.0, 0.0));
        imdraw.push(Point::new(10.0, 10.0));
        imdraw.line(2.0);
        assert_eq!(imdraw.shapes().len(), 2);

        // Vertices are consumed by the shape
        imdraw.push(Point::new(5.0, 5.0));
        imdraw.line(2.0);
        assert_eq!(imdraw.shapes().len(), 2);
    }

    #[test]
    fn test_rectangle_normalizes_corners() {
        let mut imdraw = ImDraw::new();
        imdraw.push(Point::new(10.0, 0.0));
        imdraw.push(Point::new(0.0, 8.0));
        imdraw.rectangle(0.0);
        assert_eq!(
            imdraw.shapes(),
            &[Shape::Rect {
                min: Point::new(0.0, 0.0),
                max: Point::new(10.0, 8.0),
                thickness: 0.0,
                color: Rgba::BLACK,
            }]
        );
    }

    #[test]
    fn test_clear_keeps_style() {
        let mut imdraw = ImDraw::new();
        imdraw.set_end_cap(EndCap::Sharp);
        imdraw.push(Point::new(0.0, 0.0));
        imdraw.push(Point::new(1.0, 0.0));
        imdraw.line(1.0);
        imdraw.clear();
        assert!(imdraw.shapes().is_empty());

        imdraw.push(Point::new(0.0, 0.0));
        imdraw.push(Point::new(1.0, 0.0));
        imdraw.line(1.0);
        assert!(matches!(
            imdraw.shapes()[0],
            Shape::Line {
                cap: EndCap::Sharp,
                ..
            }
        ));
    }

    #[test]
    fn test_flush_hands_shapes_to_window() {
        let mut imdraw = ImDraw::new();
        for i in 0..3 {
            imdraw.push(Point::new(i as f32, 0.0));
            imdraw.push(Point::new(i as f32 + 1.0, 1.0));
            imdraw.rectangle(0.0);
        }
        let mut window = HeadlessWindow::new();
        imdraw.flush_to(&mut window);
        assert_eq!(window.shapes_drawn(), 3);
    }

    #[test]
    fn test_alpha_compositing() {
        let half_white = Rgba::WHITE.with_alpha(0.5);
        assert_eq!(half_white.over([0.0, 0.0, 0.0]), [0.5, 0.5, 0.5]);
        assert_eq!(Rgba::WHITE.over([0.2, 0.3, 0.4]), [1.0, 1.0, 1.0]);
    }
}
