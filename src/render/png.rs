//! PNG output for rendered surfaces.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{MosaicError, Result};

use super::Surface;

/// Copy a surface's pixels into an owned image.
fn to_image<S: Surface + ?Sized>(surface: &S) -> Result<RgbaImage> {
    RgbaImage::from_raw(surface.width(), surface.height(), surface.pixels().to_vec()).ok_or_else(
        || MosaicError::Environment {
            message: "surface pixel buffer does not match its dimensions".to_string(),
            help: None,
        },
    )
}

/// Write a surface to a PNG file.
pub fn write_png<S: Surface + ?Sized>(surface: &S, path: &Path) -> Result<()> {
    to_image(surface)?.save(path).map_err(|e| MosaicError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

/// Encode a surface as PNG bytes.
pub fn encode_png<S: Surface + ?Sized>(surface: &S) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    to_image(surface)?
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| MosaicError::Environment {
            message: format!("Failed to encode PNG: {}", e),
            help: None,
        })?;
    Ok(bytes.into_inner())
}
