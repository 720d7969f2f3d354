use std::ops::Range;

use crate::draw::{EndCap, Point, Rgba, Shape};

/// Software rasterizer for [`Shape`]s.
///
/// The framebuffer covers the whole drawing surface at a (possibly smaller) pixel resolution.
/// Row 0 of the framebuffer is the top of the surface, so surface y coordinates are flipped
/// on the way in.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    surface_width: f32,
    surface_height: f32,
    pixels: Vec<[f32; 3]>,
}

impl Framebuffer {
    /// Strokes thinner than this many pixels are widened so they stay visible when scaled down.
    const MIN_STROKE: f32 = 1.0;

    pub fn new(width: usize, height: usize, surface_width: f32, surface_height: f32) -> Self {
        Framebuffer {
            width,
            height,
            surface_width,
            surface_height,
            pixels: vec![[0.0; 3]; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Size of the drawing surface the framebuffer covers.
    pub fn surface_size(&self) -> (f32, f32) {
        (self.surface_width, self.surface_height)
    }

    /// Changes the pixel resolution. Contents are reset to black.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 3]; width * height];
    }

    /// Color of the pixel at column `x`, row `y` (row 0 is the top).
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 3] {
        self.pixels[y * self.width + x]
    }

    pub fn clear(&mut self, color: Rgba) {
        let fill = color.over([0.0; 3]);
        self.pixels.iter_mut().for_each(|p| *p = fill);
    }

    pub fn draw(&mut self, shape: &Shape) {
        match *shape {
            Shape::Line {
                from,
                to,
                thickness,
                cap,
                color,
            } => self.stroke(from, to, thickness, cap, color),
            Shape::Rect {
                min,
                max,
                thickness,
                color,
            } => {
                if thickness <= 0.0 {
                    let (x0, y0) = self.to_pixel(min);
                    let (x1, y1) = self.to_pixel(max);
                    self.fill_box(x0.min(x1), x0.max(x1), y0.min(y1), y0.max(y1), color);
                } else {
                    let corners = [
                        min,
                        Point::new(max.x, min.y),
                        max,
                        Point::new(min.x, max.y),
                    ];
                    for i in 0..corners.len() {
                        let next = corners[(i + 1) % corners.len()];
                        self.stroke(corners[i], next, thickness, EndCap::Sharp, color);
                    }
                }
            }
        }
    }

    fn scale(&self) -> (f32, f32) {
        if self.surface_width <= 0.0 || self.surface_height <= 0.0 {
            return (0.0, 0.0);
        }
        (
            self.width as f32 / self.surface_width,
            self.height as f32 / self.surface_height,
        )
    }

    /// Surface coordinates to framebuffer pixel coordinates.
    fn to_pixel(&self, point: Point) -> (f32, f32) {
        let (sx, sy) = self.scale();
        (point.x * sx, (self.surface_height - point.y) * sy)
    }

    /// Pixel indices along one axis whose centers fall in `lo..hi`.
    /// A span thinner than a pixel keeps the pixel under its midpoint.
    fn span(lo: f32, hi: f32, limit: usize) -> Range<usize> {
        if limit == 0 {
            return 0..0;
        }
        let max = limit as f32;
        let start = (lo - 0.5).ceil().clamp(0.0, max);
        let end = (hi - 0.5).ceil().clamp(0.0, max);
        if end > start {
            return start as usize..end as usize;
        }
        let mid = (lo + hi) / 2.0;
        if mid < 0.0 || mid > max {
            return 0..0;
        }
        let p = (mid.floor() as usize).min(limit - 1);
        p..p + 1
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        let i = y * self.width + x;
        self.pixels[i] = color.over(self.pixels[i]);
    }

    fn fill_box(&mut self, x0: f32, x1: f32, y0: f32, y1: f32, color: Rgba) {
        let xs = Self::span(x0, x1, self.width);
        for y in Self::span(y0, y1, self.height) {
            for x in xs.clone() {
                self.blend(x, y, color);
            }
        }
    }

    fn stroke(&mut self, from: Point, to: Point, thickness: f32, cap: EndCap, color: Rgba) {
        let (sx, sy) = self.scale();
        let (ax, ay) = self.to_pixel(from);
        let (bx, by) = self.to_pixel(to);
        let extend = match cap {
            EndCap::Flat => 0.0,
            EndCap::Sharp => thickness / 2.0,
        };

        if ay == by {
            // Horizontal
            let half = (thickness * sy).max(Self::MIN_STROKE) / 2.0;
            let ext = extend * sx;
            self.fill_box(
                ax.min(bx) - ext,
                ax.max(bx) + ext,
                ay - half,
                ay + half,
                color,
            );
        } else if ax == bx {
            // Vertical
            let half = (thickness * sx).max(Self::MIN_STROKE) / 2.0;
            let ext = extend * sy;
            self.fill_box(
                ax - half,
                ax + half,
                ay.min(by) - ext,
                ay.max(by) + ext,
                color,
            );
        } else {
            let scale = (sx + sy) / 2.0;
            let half = (thickness * scale).max(Self::MIN_STROKE) / 2.0;
            let ext = extend * scale;
            self.stroke_diagonal((ax, ay), (bx, by), half, ext, color);
        }
    }

    /// Fills every pixel whose center lies within `half` of the segment, the segment being
    /// extended by `ext` at both ends.
    fn stroke_diagonal(
        &mut self,
        a: (f32, f32),
        b: (f32, f32),
        half: f32,
        ext: f32,
        color: Rgba,
    ) {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dy * dy).sqrt();
        let (ux, uy) = (dx / len, dy / len);
        let reach = half + ext;
        let xs = Self::span(a.0.min(b.0) - reach, a.0.max(b.0) + reach, self.width);
        let ys = Self::span(a.1.min(b.1) - reach, a.1.max(b.1) + reach, self.height);
        for y in ys {
            for x in xs.clone() {
                let (px, py) = (x as f32 + 0.5 - a.0, y as f32 + 0.5 - a.1);
                let along = px * ux + py * uy;
                let across = (px * uy - py * ux).abs();
                if across <= half && along >= -ext && along <= len + ext {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(1.0, 0.0, 0.0);

    fn lit(fb: &Framebuffer, color: [f32; 3]) -> Vec<(usize, usize)> {
        (0..fb.height())
            .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.pixel(x, y) == color)
            .collect()
    }

    #[test]
    fn test_fill_rect_flips_y() {
        // 10 surface units per pixel
        let mut fb = Framebuffer::new(4, 4, 40.0, 40.0);
        fb.clear(Rgba::BLACK);
        fb.draw(&Shape::Rect {
            min: Point::new(0.0, 0.0),
            max: Point::new(10.0, 10.0),
            thickness: 0.0,
            color: RED,
        });
        // Surface origin is bottom-left, so the cell lands in the last row
        assert_eq!(lit(&fb, [1.0, 0.0, 0.0]), vec![(0, 3)]);
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut fb = Framebuffer::new(2, 2, 2.0, 2.0);
        fb.clear(Rgba::WHITE);
        fb.draw(&Shape::Rect {
            min: Point::new(0.0, 0.0),
            max: Point::new(2.0, 2.0),
            thickness: 0.0,
            color: Rgba::BLACK.with_alpha(0.5),
        });
        assert_eq!(lit(&fb, [0.5, 0.5, 0.5]).len(), 4);
    }

    #[test]
    fn test_thin_lines_stay_visible_on_every_edge() {
        let mut fb = Framebuffer::new(8, 8, 800.0, 800.0);
        fb.clear(Rgba::BLACK);
        let edges = [
            (Point::new(0.0, 0.0), Point::new(800.0, 0.0)),
            (Point::new(800.0, 0.0), Point::new(800.0, 800.0)),
            (Point::new(800.0, 800.0), Point::new(0.0, 800.0)),
            (Point::new(0.0, 800.0), Point::new(0.0, 0.0)),
        ];
        for (from, to) in edges {
            fb.draw(&Shape::Line {
                from,
                to,
                thickness: 3.0,
                cap: EndCap::Sharp,
                color: Rgba::WHITE,
            });
        }
        let white = lit(&fb, [1.0, 1.0, 1.0]);
        // The full border ring of an 8x8 buffer
        assert_eq!(white.len(), 28);
        assert!(white.iter().all(|&(x, y)| x == 0 || y == 0 || x == 7 || y == 7));
    }

    #[test]
    fn test_thick_line_with_sharp_cap_extends() {
        let mut fb = Framebuffer::new(10, 10, 10.0, 10.0);
        fb.clear(Rgba::BLACK);
        fb.draw(&Shape::Line {
            from: Point::new(3.0, 5.0),
            to: Point::new(7.0, 5.0),
            thickness: 2.0,
            cap: EndCap::Sharp,
            color: RED,
        });
        let red = lit(&fb, [1.0, 0.0, 0.0]);
        // x from 2 to 8, two rows thick
        assert_eq!(red.len(), 12);
        assert!(red.iter().all(|&(x, y)| (2..8).contains(&x) && (4..6).contains(&y)));
    }

    #[test]
    fn test_diagonal_line() {
        let mut fb = Framebuffer::new(10, 10, 10.0, 10.0);
        fb.clear(Rgba::BLACK);
        fb.draw(&Shape::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 10.0),
            thickness: 1.0,
            cap: EndCap::Flat,
            color: RED,
        });
        let red = lit(&fb, [1.0, 0.0, 0.0]);
        // Anti-diagonal once flipped: (x, 9 - x) is on the segment
        assert!((0..10).all(|x| red.contains(&(x, 9 - x))));
    }

    #[test]
    fn test_zero_sized_buffer_draws_nothing() {
        let mut fb = Framebuffer::new(0, 0, 800.0, 800.0);
        fb.clear(Rgba::GRAY);
        fb.draw(&Shape::Rect {
            min: Point::new(0.0, 0.0),
            max: Point::new(800.0, 800.0),
            thickness: 0.0,
            color: RED,
        });
        assert_eq!(fb.width(), 0);
    }
}
