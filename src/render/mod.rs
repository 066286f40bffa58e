//! Rendering module for mosaic.
//!
//! This module handles drawing shapes onto surfaces: the density pass,
//! palette mapping, the outline pass, and PNG output.

mod mapper;
mod png;
mod raster;
mod surface;

pub use mapper::{apply_palette, jitter_palette};
pub use png::{encode_png, write_png};
pub use raster::{DensityMap, Rasterizer};
pub use surface::{acquire_surface, RasterSurface, Surface, Target, MAX_SURFACE_SIZE};
