//! CLI entry point for the grid rule solver

use clap::Parser;
use gridrule::io::cli::{Cli, TaskProcessor};
use gridrule::io::logging::init_logging;

fn main() -> gridrule::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;
    let mut processor = TaskProcessor::new(cli);
    processor.process().map(|_| ())
}
