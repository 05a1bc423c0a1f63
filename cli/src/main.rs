mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands};
use commands::{analyze, pixels};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");
    match &cli.command {
        Commands::Pixels(args) => pixels::run(&cli, args),
        Commands::Analyze(args) => analyze::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
