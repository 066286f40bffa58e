//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::{MosaicError, Result};

/// An RGBA colour value.
///
/// Palette entries and line colours are always opaque; the alpha channel
/// only matters for explicit line colours such as `#00000080`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a colour string.
    ///
    /// Accepts the names `black` and `white` (case-insensitive) as well as
    /// hex colours in `#RGB`, `#RRGGBB` or `#RRGGBBAA` form. The `#` is optional.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            _ => {}
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(invalid_colour(s));
        }

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (channel, digit) in channels.iter_mut().zip(hex.chars()) {
                    let d = digit.to_digit(16).ok_or_else(|| invalid_colour(s))? as u8;
                    *channel = d << 4 | d;
                }
                Ok(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 | 8 => {
                let byte = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid_colour(s))
                };
                let a = if hex.len() == 8 { byte(6)? } else { 255 };
                Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, a))
            }
            _ => Err(invalid_colour(s)),
        }
    }

    /// Convert to an RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Sum of the three colour channels (0..=765).
    pub fn channel_sum(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

fn invalid_colour(s: &str) -> MosaicError {
    MosaicError::Parse {
        message: format!("Invalid colour: {}", s),
        help: Some("Use black, white, #RGB, #RRGGBB, or #RRGGBBAA".to_string()),
    }
}

impl FromStr for Colour {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}
