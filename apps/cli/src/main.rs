//! chempack CLI — offline reference-data pipeline.
//!
//! Extracts unit, periodic-table, and physical-constant datasets from
//! spreadsheet workbooks, then bundles them with the web assets into a
//! single self-contained HTML document.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
