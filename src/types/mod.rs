//! Core domain types for mosaic.
//!
//! - `Colour` - RGBA colour values
//! - `GenerationOptions` / `GenerationConfig` - sparse options and their resolved form
//! - `ShapeParams` / `JitterTriple` / `Circle` - per-shape geometry
//! - `Tone` and palette helpers - colours derived from input bytes

mod colour;
mod config;
mod palette;
mod shape;

pub use colour::Colour;
pub use config::{
    GenerationConfig, GenerationOptions, DEFAULT_COLOUR_COUNT, DEFAULT_JITTER,
    DEFAULT_LINE_WIDTH, DEFAULT_SHAPE_COUNT,
};
pub use self::palette::{generate_palette, line_colour, tones, Tone, GOLDEN_ANGLE};
pub use shape::{Circle, JitterTriple, ShapeParams};
