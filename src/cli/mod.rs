pub mod completions;
pub mod generate;
pub mod palette;

use std::fs;
use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::error::{MosaicError, Result};
use crate::input::Input;
use crate::types::{Colour, GenerationOptions};

/// mosaic - Stained-glass visual hash generator
#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a visual hash to a PNG file
    Generate(generate::GenerateArgs),

    /// Print the palette derived from an input
    Palette(palette::PaletteArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// How to interpret the INPUT argument.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Hex if the value is all hex digits (optionally 0x-prefixed), text otherwise
    #[default]
    Auto,
    /// Hex digits, optionally 0x-prefixed
    Hex,
    /// UTF-8 text
    Text,
    /// Path to a file whose raw bytes are the input
    File,
}

/// Input value and how to read it.
///
/// Without `--hex`, `--text` or `--file` the format is detected.
#[derive(Args, Debug, Default)]
#[command(group(ArgGroup::new("input_format").args(["hex", "text", "file"])))]
pub struct InputArgs {
    /// Value to hash (hex digits, text, or a path with --file)
    #[arg(required = true)]
    pub input: String,

    /// Treat INPUT as hex digits
    #[arg(long)]
    pub hex: bool,

    /// Treat INPUT as UTF-8 text
    #[arg(long)]
    pub text: bool,

    /// Treat INPUT as a path and hash the file's bytes
    #[arg(long)]
    pub file: bool,
}

impl InputArgs {
    pub fn format(&self) -> InputFormat {
        if self.hex {
            InputFormat::Hex
        } else if self.text {
            InputFormat::Text
        } else if self.file {
            InputFormat::File
        } else {
            InputFormat::Auto
        }
    }

    pub fn read(&self) -> Result<Input> {
        match self.format() {
            InputFormat::Auto => Ok(Input::detect(&self.input)),
            InputFormat::Hex => Ok(Input::Hex(self.input.clone())),
            InputFormat::Text => Ok(Input::Text(self.input.clone())),
            InputFormat::File => {
                let path = PathBuf::from(&self.input);
                let bytes = fs::read(&path).map_err(|e| MosaicError::Io {
                    path,
                    message: format!("Failed to read input: {}", e),
                })?;
                Ok(Input::Bytes(bytes))
            }
        }
    }
}

/// Generation options shared by every command that derives a hash.
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// Number of overlapping shapes [default: 6]
    #[arg(long)]
    pub shapes: Option<usize>,

    /// Number of palette colours [default: 3]
    #[arg(long)]
    pub colours: Option<usize>,

    /// Outline width as a fraction of the image size [default: 0.02]
    #[arg(long)]
    pub line_width: Option<f64>,

    /// Magnitude of random shape and colour jitter [default: 3]
    #[arg(long)]
    pub jitter: Option<f64>,

    /// Outline colour (black, white, or #RRGGBB); computed from the palette if omitted
    #[arg(long)]
    pub line_colour: Option<Colour>,

    /// Seed for jitter, making output reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    /// Options file (.json, .yaml or .yml); flags take precedence
    #[arg(long)]
    pub options: Option<PathBuf>,
}

impl OptionArgs {
    /// Load the options file (if any) and overlay the flags.
    pub fn to_options(&self) -> Result<GenerationOptions> {
        let base = match &self.options {
            Some(path) => GenerationOptions::from_file(path)?,
            None => GenerationOptions::default(),
        };

        Ok(base.merge(GenerationOptions {
            shape_count: self.shapes,
            colour_count: self.colours,
            line_width: self.line_width,
            jitter: self.jitter,
            line_colour: self.line_colour,
            seed: self.seed,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "mosaic",
            "generate",
            "0xdeadbeef",
            "--shapes",
            "4",
            "--line-colour",
            "white",
            "--seed",
            "9",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.input.input, "0xdeadbeef");
        assert_eq!(args.params.shapes, Some(4));
        assert_eq!(args.params.line_colour, Some(Colour::WHITE));
        assert_eq!(args.params.seed, Some(9));
    }

    #[test]
    fn test_cli_rejects_bad_colour() {
        let result = Cli::try_parse_from(["mosaic", "palette", "abc", "--line-colour", "pink"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_input_format_flags() {
        let format = |flag: &str| {
            let cli = Cli::try_parse_from(["mosaic", "generate", "ff", flag]).unwrap();
            let Commands::Generate(args) = cli.command else {
                panic!("expected generate");
            };
            args.input.format()
        };
        assert_eq!(format("--hex"), InputFormat::Hex);
        assert_eq!(format("--text"), InputFormat::Text);
        assert_eq!(format("--file"), InputFormat::File);

        let cli = Cli::try_parse_from(["mosaic", "palette", "ff"]).unwrap();
        let Commands::Palette(args) = cli.command else {
            panic!("expected palette");
        };
        assert_eq!(args.input.format(), InputFormat::Auto);
    }

    #[test]
    fn test_cli_rejects_conflicting_input_formats() {
        let result = Cli::try_parse_from(["mosaic", "generate", "ff", "--hex", "--text"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_input_formats() {
        let args = |input: &str, format| {
            let mut args = InputArgs {
                input: input.to_string(),
                ..Default::default()
            };
            match format {
                InputFormat::Auto => {}
                InputFormat::Hex => args.hex = true,
                InputFormat::Text => args.text = true,
                InputFormat::File => args.file = true,
            }
            args
        };
        assert_eq!(args("ff", InputFormat::Auto).read().unwrap(), Input::Hex("ff".to_string()));
        assert_eq!(args("ff", InputFormat::Text).read().unwrap(), Input::Text("ff".to_string()));
        assert_eq!(args("hi", InputFormat::Hex).read().unwrap(), Input::Hex("hi".to_string()));

        let dir = tempdir().unwrap();
        let path = dir.path().join("input.bin");
        fs::write(&path, [0u8, 1, 2]).unwrap();
        let file = args(path.to_str().unwrap(), InputFormat::File).read().unwrap();
        assert_eq!(file, Input::Bytes(vec![0, 1, 2]));

        let missing = args("/nonexistent/input.bin", InputFormat::File).read();
        assert!(matches!(missing, Err(MosaicError::Io { .. })));
    }

    #[test]
    fn test_flags_override_options_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("opts.yaml");
        fs::write(&path, "shapeCount: 8\ncolourCount: 5\n").unwrap();

        let args = OptionArgs {
            colours: Some(2),
            options: Some(path),
            ..Default::default()
        };
        let options = args.to_options().unwrap();
        assert_eq!(options.shape_count, Some(8));
        assert_eq!(options.colour_count, Some(2));
    }
}
