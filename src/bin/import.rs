use certfile::config::{ImportArgs, Settings};
use certfile::{importer, logging};
use clap::Parser;
use std::io;

/// Converts the participants spreadsheet into the full export and the
/// certificate verification file.
#[derive(Parser, Debug)]
#[command(name = "certfile-import", version, about)]
struct Cli {
    #[command(flatten)]
    import: ImportArgs,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let settings = Settings::from_import_args(Cli::parse().import)?;

    let report = importer::run(&settings)?;
    importer::print_summary(&mut io::stdout().lock(), &report)
}
