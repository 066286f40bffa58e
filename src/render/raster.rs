//! Two-pass stained-glass rasterization.
//!
//! The first pass counts, for every pixel, how many shape circles cover it
//! and writes that count into all three colour channels. After the counts
//! have been turned into palette colours, the second pass strokes the same
//! circles as outlines so each region gets a border.

use crate::types::{Circle, Colour, JitterTriple, ShapeParams};

use super::Surface;

/// Per-pixel overlap counts for a square area.
///
/// Counts saturate at 255, which only happens with more than 255
/// overlapping shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityMap {
    size: u32,
    counts: Vec<u8>,
}

impl DensityMap {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            counts: vec![0; size as usize * size as usize],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Overlap count at a pixel.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.counts[self.index(x, y)])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size as usize + x as usize
    }

    /// Add one to every pixel whose centre lies inside `circle` (pixel units).
    pub fn accumulate(&mut self, circle: &Circle) {
        if self.size == 0 || circle.radius <= 0.0 {
            return;
        }
        let last = self.size as f64 - 1.0;
        let r2 = circle.radius * circle.radius;

        let y0 = (circle.cy - circle.radius - 0.5).ceil().max(0.0);
        let y1 = (circle.cy + circle.radius - 0.5).floor().min(last);
        if y1 < y0 {
            return;
        }

        for y in y0 as u32..=y1 as u32 {
            let dy = y as f64 + 0.5 - circle.cy;
            let span2 = r2 - dy * dy;
            if span2 < 0.0 {
                continue;
            }
            let span = span2.sqrt();
            let x0 = (circle.cx - span - 0.5).ceil().max(0.0);
            let x1 = (circle.cx + span - 0.5).floor().min(last);
            if x1 < x0 {
                continue;
            }

            let row = self.index(0, y);
            for count in &mut self.counts[row + x0 as usize..=row + x1 as usize] {
                *count = count.saturating_add(1);
            }
        }
    }

    /// Write the counts as grey levels into the surface's square area.
    ///
    /// The surface area must be at least `size` pixels on each edge.
    pub fn write_to<S: Surface + ?Sized>(&self, surface: &mut S) {
        let stride = surface.width() as usize * 4;
        let pixels = surface.pixels_mut();
        for (y, row) in self.counts.chunks(self.size.max(1) as usize).enumerate() {
            for (x, &count) in row.iter().enumerate() {
                let i = y * stride + x * 4;
                pixels[i..i + 4].copy_from_slice(&[count, count, count, 255]);
            }
        }
    }
}

/// Draws the shapes of one generation call.
///
/// Circles are computed once from shape params and their jitter, so the
/// density and outline passes see exactly the same geometry.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    size: u32,
    circles: Vec<Circle>,
}

impl Rasterizer {
    /// Build the circles for `shapes` at `size` pixels.
    ///
    /// `shapes` and `jitter` are paired by index.
    pub fn new(size: u32, shapes: &[ShapeParams], jitter: &[JitterTriple]) -> Self {
        let circles = shapes
            .iter()
            .zip(jitter)
            .map(|(shape, j)| shape.circle(j).scaled(size as f64))
            .collect();
        Self { size, circles }
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Compute overlap counts without touching a surface.
    pub fn density(&self) -> DensityMap {
        let mut density = DensityMap::new(self.size);
        for circle in &self.circles {
            density.accumulate(circle);
        }
        density
    }

    /// Pass 1: black background, then the overlap counts as grey levels.
    pub fn density_pass<S: Surface + ?Sized>(&self, surface: &mut S) -> DensityMap {
        surface.fill_rect(0, 0, self.size, self.size, Colour::BLACK);
        let density = self.density();
        density.write_to(surface);
        density
    }

    /// Pass 2: stroke every circle in `colour`.
    pub fn outline_pass<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        line_width: f64,
        colour: Colour,
    ) {
        for circle in &self.circles {
            surface.stroke_circle(circle, line_width, colour);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RasterSurface;

    fn circle(cx: f64, cy: f64, radius: f64) -> Circle {
        Circle { cx, cy, radius }
    }

    #[test]
    fn test_accumulate_counts_overlaps() {
        let mut density = DensityMap::new(10);
        density.accumulate(&circle(3.0, 5.0, 3.0));
        density.accumulate(&circle(7.0, 5.0, 3.0));

        assert_eq!(density.get(1, 4), Some(1));
        assert_eq!(density.get(4, 4), Some(2));
        assert_eq!(density.get(8, 4), Some(1));
        assert_eq!(density.get(0, 0), Some(0));
        assert_eq!(density.get(10, 0), None);
    }

    #[test]
    fn test_accumulate_uses_pixel_centres() {
        let mut density = DensityMap::new(4);
        // Covers exactly the centres (1.5, 1.5) .. (2.5, 2.5).
        density.accumulate(&circle(2.0, 2.0, 0.75));
        let covered: Vec<(u32, u32)> = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| density.get(x, y) == Some(1))
            .collect();
        assert_eq!(covered, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_accumulate_outside_is_noop() {
        let mut density = DensityMap::new(8);
        density.accumulate(&circle(-50.0, 4.0, 10.0));
        density.accumulate(&circle(4.0, 4.0, 0.0));
        assert_eq!(density, DensityMap::new(8));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_indexing_past_u32_range() {
        // 70000 * 70000 does not fit in a u32; the row offset must not wrap.
        let size = 70_000u32;
        let density = DensityMap {
            size,
            counts: Vec::new(),
        };
        assert_eq!(density.index(69_999, 69_999), 69_999 * 70_000 + 69_999);
    }

    #[test]
    fn test_accumulate_saturates() {
        let mut density = DensityMap::new(2);
        let big = circle(1.0, 1.0, 5.0);
        for _ in 0..300 {
            density.accumulate(&big);
        }
        assert_eq!(density.get(0, 0), Some(255));
    }

    #[test]
    fn test_density_pass_writes_grey_levels() {
        let shapes = [ShapeParams::from_bytes([0, 0])];
        let jitter = [JitterTriple::default()];
        let rasterizer = Rasterizer::new(16, &shapes, &jitter);

        let mut surface = RasterSurface::create(16).unwrap();
        let density = rasterizer.density_pass(&mut surface);

        for y in 0..16 {
            for x in 0..16 {
                let count = density.get(x, y).unwrap();
                assert_eq!(surface.get(x, y), Some(Colour::rgb(count, count, count)));
            }
        }
    }

    #[test]
    fn test_density_pass_on_wider_surface() {
        let mut surface = RasterSurface::from_image(image::RgbaImage::new(12, 8));
        let rasterizer = Rasterizer::new(surface.working_size(), &[], &[]);
        rasterizer.density_pass(&mut surface);

        assert_eq!(surface.get(7, 7), Some(Colour::BLACK));
        // Outside the square working area nothing is drawn.
        assert_eq!(surface.get(10, 0), Some(Colour::new(0, 0, 0, 0)));
    }

    #[test]
    fn test_circles_shared_between_passes() {
        let shapes = [
            ShapeParams::from_bytes([0x2b, 0x91]),
            ShapeParams::from_bytes([0xf0, 0x0f]),
        ];
        let jitter = [
            JitterTriple {
                curvature: 0.3,
                x: 0.1,
                y: 0.9,
            },
            JitterTriple {
                curvature: 0.7,
                x: 0.5,
                y: 0.2,
            },
        ];
        let rasterizer = Rasterizer::new(100, &shapes, &jitter);
        assert_eq!(rasterizer.circles().len(), 2);
        assert_eq!(rasterizer.circles()[1], shapes[1].circle(&jitter[1]).scaled(100.0));
    }
}
