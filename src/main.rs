//! CLI entry point for the word portrait generator

use clap::Parser;
use wordportrait::io::cli::{Cli, PortraitCommand};

fn main() -> wordportrait::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    let mut command = PortraitCommand::new(cli);
    command.run()
}
