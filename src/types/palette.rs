//! Palette generation from normalized bytes.
//!
//! Small palettes (2 or 3 colours) pick hues offset from a base hue by a
//! quarter turn or more, which tends to give contrasting pairs. Larger
//! palettes step around the hue circle by the golden angle so that any
//! number of colours stays well spread.

use palette::{encoding, Hsl, IntoColor, Srgb};

use super::Colour;

/// The golden angle as a fraction of a full turn.
pub const GOLDEN_ANGLE: f64 = 0.381966;

/// Palettes with an average channel value below this get white outlines.
const DARK_PALETTE_THRESHOLD: f64 = 96.0;

/// Hue and lightness of one palette entry, both in [0, 1].
///
/// Saturation is always 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub hue: f64,
    pub lightness: f64,
}

impl Tone {
    /// Convert to an opaque RGB colour, rounding each channel.
    pub fn to_colour(self) -> Colour {
        let hsl: Hsl<encoding::Srgb, f64> = Hsl::new(self.hue * 360.0, 1.0, self.lightness);
        let rgb: Srgb<f64> = hsl.into_color();
        Colour::rgb(
            (rgb.red * 255.0).round() as u8,
            (rgb.green * 255.0).round() as u8,
            (rgb.blue * 255.0).round() as u8,
        )
    }
}

/// Lightness for a nibble, between 0.2 and roughly 0.86.
fn lightness(nibble: u8) -> f64 {
    0.2 + (nibble as f64 / 16.0) * 0.7
}

/// Derive `count` tones from `bytes`.
///
/// `bytes` must hold at least four bytes whenever `count` is non-zero; the
/// normalized buffer always reserves sixteen spare bytes for this.
pub fn tones(count: usize, bytes: &[u8]) -> Vec<Tone> {
    if count == 0 {
        return Vec::new();
    }

    let mut hue = bytes[0] as f64 / 256.0;
    let mut tones = Vec::with_capacity(count);
    tones.push(Tone {
        hue,
        lightness: lightness(bytes[1] % 16),
    });

    match count {
        1 => {}
        2 | 3 => {
            tones.push(Tone {
                hue: (hue + 0.25 + (bytes[1] >> 4) as f64 / 16.0 * 0.5).rem_euclid(1.0),
                lightness: lightness(bytes[2] % 16),
            });
            if count == 3 {
                tones.push(Tone {
                    hue: (hue - 0.25 - (bytes[2] >> 4) as f64 / 16.0 * 0.5).rem_euclid(1.0),
                    lightness: lightness(bytes[3] % 16),
                });
            }
        }
        _ => {
            while tones.len() < count {
                let byte = bytes[(tones.len() + 1) % bytes.len()];
                hue += GOLDEN_ANGLE;
                hue += (byte % 16) as f64 / 16.0 * 0.2 - 0.1;
                hue = hue.rem_euclid(1.0);
                tones.push(Tone {
                    hue,
                    lightness: lightness(byte >> 4),
                });
            }
        }
    }

    tones
}

/// Generate a palette of exactly `count` colours from `bytes`.
pub fn generate_palette(count: usize, bytes: &[u8]) -> Vec<Colour> {
    tones(count, bytes).into_iter().map(Tone::to_colour).collect()
}

/// Pick black or white outlines for a palette.
///
/// Averages every channel of every colour; dark palettes get white lines.
/// An empty palette gets black lines.
pub fn line_colour(palette: &[Colour]) -> Colour {
    if palette.is_empty() {
        return Colour::BLACK;
    }

    let total: u32 = palette.iter().map(|c| c.channel_sum()).sum();
    let average = total as f64 / (palette.len() * 3) as f64;

    if average < DARK_PALETTE_THRESHOLD {
        Colour::WHITE
    } else {
        Colour::BLACK
    }
}
