mod analyze_cmd;
mod cli;
mod config;
mod convert;
mod logging;
mod report;
mod simulate_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Inspect(args) => analyze_cmd::inspect(args),
        Command::Classes(args) => analyze_cmd::classes(args),
        Command::Limits(args) => analyze_cmd::limits(args),
        Command::Analyze(args) => analyze_cmd::run(args),
        Command::Simulate(args) => simulate_cmd::run(args),
    }
}
