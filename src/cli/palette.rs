use clap::Args;

use crate::error::Result;
use crate::input::NormalizedBytes;
use crate::output::{plural, Printer};
use crate::types::{generate_palette, line_colour, Colour};

use super::{InputArgs, OptionArgs};

/// Print the palette derived from an input
#[derive(Args, Debug)]
pub struct PaletteArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub params: OptionArgs,
}

/// Palette lines in `$colour-N: #RRGGBB` form, followed by the line colour.
pub fn palette_lines(palette: &[Colour], line: Colour) -> Vec<String> {
    palette
        .iter()
        .enumerate()
        .map(|(i, colour)| format!("$colour-{}: {}", i + 1, colour))
        .chain(std::iter::once(format!("$line: {}", line)))
        .collect()
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let input = args.input.read()?;
    let config = args.params.to_options()?.resolve();

    let bytes = NormalizedBytes::new(&input, &config)?;
    let palette = generate_palette(config.colour_count, bytes.palette_bytes(config.shape_count));
    let line = config.line_colour.unwrap_or_else(|| line_colour(&palette));

    printer.status(
        "Derived",
        &format!("{} from {} input bytes", plural(palette.len(), "colour", "colours"), bytes.len()),
    );

    for line in palette_lines(&palette, line) {
        println!("{}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_palette_lines() {
        let lines = palette_lines(&[Colour::rgb(0x66, 0, 0)], Colour::WHITE);
        assert_eq!(lines, vec!["$colour-1: #660000", "$line: #FFFFFF"]);
    }

    #[test]
    fn test_palette_lines_empty() {
        assert_eq!(palette_lines(&[], Colour::BLACK), vec!["$line: #000000"]);
    }
}
