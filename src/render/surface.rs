//! Drawing surfaces.
//!
//! The pipeline only needs a handful of primitives from a surface: its size,
//! a rectangle fill, a circle outline, and raw RGBA access. `RasterSurface`
//! provides them on top of an in-memory `image::RgbaImage`, stroking
//! outlines with tiny-skia.

use image::{ImageBuffer, Rgba, RgbaImage};
use tiny_skia::{ColorU8, Paint, PathBuilder, PixmapMut, PremultipliedColorU8, Stroke, Transform};

use crate::error::{MosaicError, Result};
use crate::types::{Circle, Colour};

/// Largest edge length `RasterSurface::create` will allocate.
pub const MAX_SURFACE_SIZE: u32 = 16384;

/// A rectangular RGBA8 canvas the pipeline draws onto.
///
/// Pixel data is row-major with four bytes per pixel and no row padding.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Allocate a new square surface.
    ///
    /// Surfaces that can only wrap existing canvases keep the default, which
    /// reports that no surface can be created.
    fn create(size: u32) -> Result<Self>
    where
        Self: Sized,
    {
        Err(MosaicError::Environment {
            message: format!("cannot create a {}x{} surface", size, size),
            help: Some("Pass an existing surface instead of a size".to_string()),
        })
    }

    /// Fill a rectangle with an opaque colour. Clipped to the surface.
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, colour: Colour);

    /// Stroke the outline of a circle (pixel units), anti-aliased.
    fn stroke_circle(&mut self, circle: &Circle, line_width: f64, colour: Colour);

    fn pixels(&self) -> &[u8];

    fn pixels_mut(&mut self) -> &mut [u8];

    /// Edge length of the square region the pipeline works in.
    fn working_size(&self) -> u32 {
        self.width().min(self.height())
    }
}

/// Where to draw: a fresh surface of a given size, or an existing one.
#[derive(Debug)]
pub enum Target<S> {
    Size(u32),
    Surface(S),
}

impl<S> From<u32> for Target<S> {
    fn from(size: u32) -> Self {
        Target::Size(size)
    }
}

/// Resolve a target into a surface, creating one if needed.
pub fn acquire_surface<S: Surface>(target: Target<S>) -> Result<S> {
    match target {
        Target::Size(size) => S::create(size),
        Target::Surface(surface) => Ok(surface),
    }
}

/// An in-memory surface backed by an `RgbaImage`.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Wrap an existing image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Read one pixel as a colour.
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        Some(Colour::new(r, g, b, a))
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn create(size: u32) -> Result<Self> {
        if size == 0 || size > MAX_SURFACE_SIZE {
            return Err(MosaicError::Environment {
                message: format!("cannot allocate a {}x{} surface", size, size),
                help: Some(format!("Use a size between 1 and {}", MAX_SURFACE_SIZE)),
            });
        }
        Ok(Self {
            image: ImageBuffer::from_pixel(size, size, Rgba([0, 0, 0, 0])),
        })
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, colour: Colour) {
        let x_end = x.saturating_add(width).min(self.image.width());
        let y_end = y.saturating_add(height).min(self.image.height());
        let rgba = Rgba(colour.to_rgba());

        for py in y..y_end {
            for px in x..x_end {
                self.image.put_pixel(px, py, rgba);
            }
        }
    }

    fn stroke_circle(&mut self, circle: &Circle, line_width: f64, colour: Colour) {
        // A zero width would be a hairline in tiny-skia.
        if line_width <= 0.0 || !line_width.is_finite() {
            return;
        }
        let Some(path) =
            PathBuilder::from_circle(circle.cx as f32, circle.cy as f32, circle.radius as f32)
        else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(colour.r, colour.g, colour.b, colour.a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: line_width as f32,
            ..Stroke::default()
        };

        let (width, height) = self.image.dimensions();
        premultiply(&mut self.image);
        if let Some(mut pixmap) = PixmapMut::from_bytes(&mut self.image, width, height) {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
        demultiply(&mut self.image);
    }

    fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }
}

/// Convert straight RGBA to the premultiplied form tiny-skia draws on.
fn premultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        if px[3] != 255 {
            let c = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
            px.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
    }
}

fn demultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        if px[3] != 255 {
            if let Some(c) = PremultipliedColorU8::from_rgba(px[0], px[1], px[2], px[3]) {
                let c = c.demultiply();
                px.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
            }
        }
    }
}
