//! mosaic - stained-glass visual hashes
//!
//! Turns bytes, hex strings or text into a square image of overlapping
//! translucent circles, coloured by how many circles cover each pixel and
//! separated by outlines. Similar inputs are meant to be recognisable at a
//! glance; this is not a cryptographic hash.
//!
//! ```no_run
//! use mosaic::{generate, GenerationOptions, Input, RasterSurface, Target};
//!
//! let surface: RasterSurface =
//!     generate(&Input::from("0xdeadbeef"), Target::Size(128), &GenerationOptions::default())?;
//! mosaic::write_png(&surface, std::path::Path::new("hash.png"))?;
//! # Ok::<(), mosaic::MosaicError>(())
//! ```

pub mod cli;
pub mod error;
pub mod generate;
pub mod input;
pub mod output;
pub mod render;
pub mod types;

pub use error::{MosaicError, Result};
pub use generate::{generate, generate_with_rng, GenerationContext};
pub use input::{parse_hex, Input, NormalizedBytes};
pub use render::{
    acquire_surface, encode_png, write_png, DensityMap, RasterSurface, Rasterizer, Surface, Target,
};
pub use types::{
    generate_palette, line_colour, Circle, Colour, GenerationConfig, GenerationOptions,
    JitterTriple, ShapeParams, Tone,
};
