//! Shape parameters derived from normalized bytes.
//!
//! Every shape is a large circle whose edge cuts across the image. Two bytes
//! decide its curvature, the direction its centre lies in, and a small offset.

use std::f64::consts::TAU;

use rand::Rng;

use crate::input::NormalizedBytes;

/// Geometry parameters for one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    /// Curvature class, 0..=7. Higher values give larger radii.
    pub curvature: u8,
    /// Direction of the centre as a fraction of a full turn, in [0, 1).
    pub angle: f64,
    /// Horizontal offset in image fractions, roughly [-0.4, 0.4].
    pub delta_x: f64,
    /// Vertical offset in image fractions, roughly [-0.4, 0.4].
    pub delta_y: f64,
}

impl ShapeParams {
    /// Derive shape parameters from two bytes.
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        let [b0, b1] = bytes;
        Self {
            curvature: b0 % 8,
            angle: (b0 >> 3) as f64 / 32.0,
            delta_x: centre_offset(b1 % 16),
            delta_y: centre_offset(b1 >> 4),
        }
    }

    /// Derive all shapes for a normalized buffer, in drawing order.
    pub fn derive_all(bytes: &NormalizedBytes, shape_count: usize) -> Vec<Self> {
        (0..shape_count)
            .map(|i| Self::from_bytes(bytes.shape_bytes(i)))
            .collect()
    }

    /// Compute the circle for this shape in image-fraction units.
    pub fn circle(&self, jitter: &JitterTriple) -> Circle {
        let curvature = self.curvature as f64 + jitter.curvature - 0.5;
        let radius = curvature * curvature * 0.02 + 0.8;
        let turn = self.angle * TAU;

        Circle {
            cx: 0.5 + radius * turn.sin() + self.delta_x + (jitter.x - 0.5) / 64.0,
            cy: 0.5 + radius * turn.cos() + self.delta_y + (jitter.y - 0.5) / 64.0,
            radius,
        }
    }
}

/// Map a nibble to an offset centred on zero.
fn centre_offset(nibble: u8) -> f64 {
    (nibble as f64 - 7.5) / 18.75
}

/// Per-shape random perturbation, shared by the fill and outline passes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JitterTriple {
    pub curvature: f64,
    pub x: f64,
    pub y: f64,
}

impl JitterTriple {
    /// Draw three values in `[0, jitter / 3)`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, jitter: f64) -> Self {
        let scale = jitter / 3.0;
        Self {
            curvature: rng.gen::<f64>() * scale,
            x: rng.gen::<f64>() * scale,
            y: rng.gen::<f64>() * scale,
        }
    }
}

/// A circle in image-fraction units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Circle {
    /// Scale to pixel units.
    pub fn scaled(&self, size: f64) -> Self {
        Self {
            cx: self.cx * size,
            cy: self.cy * size,
            radius: self.radius * size,
        }
    }
}
