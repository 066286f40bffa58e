//! Density-to-colour mapping.

use rand::Rng;

use crate::types::Colour;

use super::Surface;

/// Perturb each palette colour once for this generation call.
///
/// Every channel moves by up to `jitter * 2.5` in either direction and is
/// clamped to 0..=255.
pub fn jitter_palette<R: Rng + ?Sized>(
    palette: &[Colour],
    jitter: f64,
    rng: &mut R,
) -> Vec<Colour> {
    let mut perturb = |channel: u8| {
        let offset = (rng.gen::<f64>() - 0.5) * jitter * 5.0;
        (channel as f64 + offset).clamp(0.0, 255.0).round() as u8
    };

    palette
        .iter()
        .map(|c| {
            let r = perturb(c.r);
            let g = perturb(c.g);
            let b = perturb(c.b);
            Colour::rgb(r, g, b)
        })
        .collect()
}

/// Recolour the square `size` area of a density-filled surface.
///
/// Each pixel's red channel holds its overlap count `v`; the pixel becomes
/// `palette[v % palette.len()]`. Alpha is left as is. An empty palette
/// leaves the surface untouched.
pub fn apply_palette<S: Surface + ?Sized>(surface: &mut S, size: u32, palette: &[Colour]) {
    if palette.is_empty() || size == 0 {
        return;
    }

    let stride = surface.width() as usize * 4;
    let row_len = size as usize * 4;
    let pixels = surface.pixels_mut();

    for row in pixels.chunks_mut(stride).take(size as usize) {
        for pixel in row[..row_len].chunks_exact_mut(4) {
            let colour = palette[pixel[0] as usize % palette.len()];
            pixel[0] = colour.r;
            pixel[1] = colour.g;
            pixel[2] = colour.b;
        }
    }
}
