//! Generate command implementation.
//!
//! Renders one visual hash and writes it as a PNG file, or to stdout when
//! the output path is `-`.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::generate::generate;
use crate::output::{display_path, plural, Printer};
use crate::render::{encode_png, write_png, RasterSurface, Target};

use super::{InputArgs, OptionArgs};

/// Render a visual hash to a PNG file
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file, or - for stdout
    #[arg(long, short, default_value = "mosaic.png")]
    pub output: PathBuf,

    /// Edge length of the square image in pixels
    #[arg(long, default_value = "256")]
    pub size: u32,

    #[command(flatten)]
    pub params: OptionArgs,
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let input = args.input.read()?;
    let options = args.params.to_options()?;
    let config = options.resolve();

    let surface: RasterSurface = generate(&input, Target::Size(args.size), &options)?;

    let summary = format!(
        "{}x{}, {}, {}",
        args.size,
        args.size,
        plural(config.shape_count, "shape", "shapes"),
        plural(config.colour_count, "colour", "colours"),
    );

    if args.output.as_os_str() == "-" {
        let bytes = encode_png(&surface)?;
        std::io::stdout().lock().write_all(&bytes)?;
        printer.status("Generated", &format!("stdout ({})", summary));
    } else {
        write_png(&surface, &args.output)?;
        printer.status(
            "Generated",
            &format!("{} ({})", display_path(&args.output), summary),
        );
    }

    if options.seed.is_none() {
        printer.info("Note", "jitter is random; pass --seed for reproducible output");
    }

    Ok(())
}
