mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands};
use commands::{echo, periods, render};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Commands::Periods(args) => periods::run(&cli, args),
        Commands::Render(args) => render::run(&cli, args),
        Commands::Echo(args) => echo::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
