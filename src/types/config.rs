//! Generation options and their resolved configuration.
//!
//! Options are sparse: every field may be omitted and falls back to a
//! default when resolved. Options can be loaded from JSON or YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{MosaicError, Result};

use super::Colour;

/// Default number of overlapping shapes.
pub const DEFAULT_SHAPE_COUNT: usize = 6;

/// Default number of palette colours.
pub const DEFAULT_COLOUR_COUNT: usize = 3;

/// Default outline width as a fraction of the image size.
pub const DEFAULT_LINE_WIDTH: f64 = 0.02;

/// Default jitter magnitude.
pub const DEFAULT_JITTER: f64 = 3.0;

/// Sparse, user-supplied generation options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerationOptions {
    #[serde(alias = "numberOfCurves")]
    pub shape_count: Option<usize>,

    #[serde(alias = "numberOfColors", alias = "colorCount")]
    pub colour_count: Option<usize>,

    #[serde(alias = "lineWidthFraction")]
    pub line_width: Option<f64>,

    pub jitter: Option<f64>,

    #[serde(alias = "lineColor")]
    pub line_colour: Option<Colour>,

    /// Seed for the jitter source. Without one, jitter comes from entropy.
    pub seed: Option<u64>,
}

impl GenerationOptions {
    /// Load options from a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| MosaicError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read options: {}", e),
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "json" => Self::from_json(&source),
            "yaml" | "yml" => Self::from_yaml(&source),
            _ => Err(MosaicError::Parse {
                message: format!("Unsupported options file: {}", path.display()),
                help: Some("Use a .json, .yaml or .yml file".to_string()),
            }),
        }
    }

    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| MosaicError::Parse {
            message: format!("Invalid JSON options: {}", e),
            help: None,
        })
    }

    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| MosaicError::Parse {
            message: format!("Invalid YAML options: {}", e),
            help: None,
        })
    }

    /// Overlay `other` onto these options; fields set in `other` win.
    pub fn merge(self, other: GenerationOptions) -> Self {
        Self {
            shape_count: other.shape_count.or(self.shape_count),
            colour_count: other.colour_count.or(self.colour_count),
            line_width: other.line_width.or(self.line_width),
            jitter: other.jitter.or(self.jitter),
            line_colour: other.line_colour.or(self.line_colour),
            seed: other.seed.or(self.seed),
        }
    }

    /// Fill in every missing field with its default.
    ///
    /// Values are passed through unchecked; a zero shape count simply
    /// produces an image without shapes.
    pub fn resolve(&self) -> GenerationConfig {
        GenerationConfig {
            shape_count: self.shape_count.unwrap_or(DEFAULT_SHAPE_COUNT),
            colour_count: self.colour_count.unwrap_or(DEFAULT_COLOUR_COUNT),
            line_width: self.line_width.unwrap_or(DEFAULT_LINE_WIDTH),
            jitter: self.jitter.unwrap_or(DEFAULT_JITTER),
            line_colour: self.line_colour,
        }
    }
}

/// Fully resolved generation parameters for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub shape_count: usize,
    pub colour_count: usize,
    pub line_width: f64,
    pub jitter: f64,
    pub line_colour: Option<Colour>,
}

impl GenerationConfig {
    /// Length of the normalized byte buffer: 3 per shape, 1 per colour, plus 16.
    pub fn byte_len(&self) -> usize {
        self.shape_count * 3 + self.colour_count + 16
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationOptions::default().resolve()
    }
}
