use clap::Parser;
use miette::Result;
use mosaic::cli::{Cli, Commands};
use mosaic::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Generate(args) => mosaic::cli::generate::run(args, &printer)?,
        Commands::Palette(args) => mosaic::cli::palette::run(args, &printer)?,
        Commands::Completions(args) => mosaic::cli::completions::run(args)?,
    }

    Ok(())
}
