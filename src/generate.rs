//! The generation pipeline.
//!
//! `generate` resolves options, normalizes the input, derives shapes and a
//! palette, then draws: density pass, palette mapping, outline pass.
//!
//! Jitter comes from a random source. Without a `seed` option two calls with
//! the same input give images from the same family but not identical pixels.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::input::{Input, NormalizedBytes};
use crate::render::{
    acquire_surface, apply_palette, jitter_palette, DensityMap, Rasterizer, Surface, Target,
};
use crate::types::{
    generate_palette, line_colour, Colour, GenerationConfig, GenerationOptions, JitterTriple,
    ShapeParams,
};

/// Everything derived for one generation call.
///
/// Owned by a single call and dropped at its end.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    config: GenerationConfig,
    bytes: NormalizedBytes,
    shapes: Vec<ShapeParams>,
    jitter: Vec<JitterTriple>,
    palette: Vec<Colour>,
}

impl GenerationContext {
    /// Normalize `input` and derive shapes, jitter and palette.
    pub fn new<R: Rng + ?Sized>(
        input: &Input,
        config: GenerationConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let bytes = NormalizedBytes::new(input, &config)?;
        let shapes = ShapeParams::derive_all(&bytes, config.shape_count);
        let jitter = shapes
            .iter()
            .map(|_| JitterTriple::sample(rng, config.jitter))
            .collect();
        let palette =
            generate_palette(config.colour_count, bytes.palette_bytes(config.shape_count));

        Ok(Self {
            config,
            bytes,
            shapes,
            jitter,
            palette,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn bytes(&self) -> &NormalizedBytes {
        &self.bytes
    }

    pub fn shapes(&self) -> &[ShapeParams] {
        &self.shapes
    }

    pub fn jitter(&self) -> &[JitterTriple] {
        &self.jitter
    }

    /// The palette before per-call colour jitter.
    pub fn palette(&self) -> &[Colour] {
        &self.palette
    }

    /// The explicit line colour, or black/white picked from the palette.
    pub fn line_colour(&self) -> Colour {
        self.config
            .line_colour
            .unwrap_or_else(|| line_colour(&self.palette))
    }

    /// Draw onto `surface`, returning the density map from the first pass.
    pub fn render<S, R>(&self, surface: &mut S, rng: &mut R) -> DensityMap
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let size = surface.working_size();
        let rasterizer = Rasterizer::new(size, &self.shapes, &self.jitter);

        let density = rasterizer.density_pass(surface);

        let jittered = jitter_palette(&self.palette, self.config.jitter, rng);
        apply_palette(surface, size, &jittered);

        let line_width = size as f64 * self.config.line_width;
        rasterizer.outline_pass(surface, line_width, self.line_colour());

        density
    }
}

/// Generate a visual hash for `input` onto `target`.
///
/// Uses `options.seed` for jitter when present, thread-local entropy otherwise.
pub fn generate<S: Surface>(
    input: &Input,
    target: Target<S>,
    options: &GenerationOptions,
) -> Result<S> {
    match options.seed {
        Some(seed) => generate_with_rng(input, target, options, &mut StdRng::seed_from_u64(seed)),
        None => generate_with_rng(input, target, options, &mut rand::thread_rng()),
    }
}

/// Generate a visual hash with an explicit random source for jitter.
pub fn generate_with_rng<S: Surface, R: Rng + ?Sized>(
    input: &Input,
    target: Target<S>,
    options: &GenerationOptions,
    rng: &mut R,
) -> Result<S> {
    let mut surface = acquire_surface(target)?;
    let context = GenerationContext::new(input, options.resolve(), rng)?;
    context.render(&mut surface, rng);
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MosaicError;
    use crate::render::RasterSurface;
    use crate::types::Circle;
    use image::RgbaImage;
    use pretty_assertions::assert_eq;

    fn options(shapes: usize, colours: usize, jitter: f64) -> GenerationOptions {
        GenerationOptions {
            shape_count: Some(shapes),
            colour_count: Some(colours),
            jitter: Some(jitter),
            ..Default::default()
        }
    }

    fn distinct_colours(surface: &RasterSurface) -> Vec<Colour> {
        let mut colours: Vec<Colour> = surface
            .image()
            .pixels()
            .map(|p| Colour::new(p.0[0], p.0[1], p.0[2], p.0[3]))
            .collect();
        colours.sort_by_key(|c| c.to_rgba());
        colours.dedup();
        colours
    }

    #[test]
    fn test_generate_default_options() {
        let surface: RasterSurface =
            generate(&Input::from("hello world"), Target::Size(48), &GenerationOptions::default())
                .unwrap();
        assert_eq!(surface.image().dimensions(), (48, 48));
        assert!(surface.image().pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let mut opts = options(6, 3, 3.0);
        opts.seed = Some(1234);
        let input = Input::from("reproducible");

        let a: RasterSurface = generate(&input, Target::Size(40), &opts).unwrap();
        let b: RasterSurface = generate(&input, Target::Size(40), &opts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input_is_input_error() {
        let result: Result<RasterSurface> =
            generate(&Input::Bytes(vec![]), Target::Size(16), &GenerationOptions::default());
        assert!(matches!(result, Err(MosaicError::Input { .. })));
    }

    #[test]
    fn test_bad_size_is_environment_error() {
        let result: Result<RasterSurface> =
            generate(&Input::from("x"), Target::Size(0), &GenerationOptions::default());
        assert!(matches!(result, Err(MosaicError::Environment { .. })));
    }

    #[test]
    fn test_zero_shapes_gives_uniform_first_colour() {
        let input = Input::from("zero shapes");
        let opts = options(0, 3, 3.0);
        let mut rng = StdRng::seed_from_u64(5);
        let context = GenerationContext::new(&input, opts.resolve(), &mut rng).unwrap();

        let mut surface = RasterSurface::create(24).unwrap();
        let density = context.render(&mut surface, &mut rng);
        assert_eq!(density, DensityMap::new(24));

        // Replaying the same draws gives the jittered palette that was used.
        let mut replay = StdRng::seed_from_u64(5);
        let replayed = GenerationContext::new(&input, opts.resolve(), &mut replay).unwrap();
        let jittered = jitter_palette(replayed.palette(), 3.0, &mut replay);

        assert_eq!(distinct_colours(&surface), vec![jittered[0]]);
    }

    #[test]
    fn test_single_shape_scenario() {
        let mut opts = options(1, 1, 0.0);
        opts.line_colour = Some(Colour::rgb(255, 0, 0));
        let input = Input::from("00");
        let mut rng = StdRng::seed_from_u64(0);
        let context = GenerationContext::new(&input, opts.resolve(), &mut rng).unwrap();

        assert_eq!(context.shapes(), &[ShapeParams::from_bytes([0, 0])]);
        assert_eq!(context.jitter(), &[JitterTriple::default()]);
        assert_eq!(context.palette().len(), 1);

        let mut surface = RasterSurface::create(64).unwrap();
        let density = context.render(&mut surface, &mut rng);

        // Centre at (0.5 - 0.4, 0.5 + 0.805 - 0.4), nudged by -0.5/64, radius 0.805.
        let circle = Circle {
            cx: 0.5 - 0.4 - 0.5 / 64.0,
            cy: 0.5 + 0.805 - 0.4 - 0.5 / 64.0,
            radius: 0.805,
        }
        .scaled(64.0);
        for y in 0..64u32 {
            for x in 0..64u32 {
                let dx = x as f64 + 0.5 - circle.cx;
                let dy = y as f64 + 0.5 - circle.cy;
                let inside = dx * dx + dy * dy <= circle.radius * circle.radius;
                assert_eq!(density.get(x, y), Some(inside as u8), "pixel ({}, {})", x, y);
            }
        }

        // One region colour plus the outline.
        let fill = context.palette()[0];
        assert_eq!(surface.get(63, 0), Some(fill));
        assert_eq!(surface.get(5, 57), Some(fill));
        let colours = distinct_colours(&surface);
        assert!(colours.contains(&Colour::rgb(255, 0, 0)));
        assert!(colours
            .iter()
            .all(|c| *c == fill || *c == Colour::rgb(255, 0, 0) || blends(*c, fill)));
    }

    /// Anti-aliased outline pixels lie between the fill and pure red.
    fn blends(c: Colour, fill: Colour) -> bool {
        let between = |v: u8, a: u8, b: u8| v >= a.min(b) && v <= a.max(b);
        between(c.r, fill.r, 255) && between(c.g, fill.g, 0) && between(c.b, fill.b, 0)
    }

    #[test]
    fn test_computed_line_colour() {
        let input = Input::from("00");
        let mut rng = StdRng::seed_from_u64(0);
        let context =
            GenerationContext::new(&input, options(1, 1, 0.0).resolve(), &mut rng).unwrap();
        // hue 0, lightness 0.2 -> #660000, average 34 -> white lines
        assert_eq!(context.palette(), &[Colour::rgb(0x66, 0, 0)]);
        assert_eq!(context.line_colour(), Colour::WHITE);
    }

    #[test]
    fn test_existing_surface_uses_smaller_edge() {
        let existing = RasterSurface::from_image(RgbaImage::new(50, 30));
        let opts = options(4, 4, 1.0);
        let surface =
            generate(&Input::Bytes(vec![1, 2, 3, 4, 5]), Target::Surface(existing), &opts).unwrap();

        assert_eq!(surface.image().dimensions(), (50, 30));
        for y in 0..30 {
            for x in 0..30 {
                assert_eq!(surface.get(x, y).map(|c| c.a), Some(255));
            }
        }
    }
}
