//! Strata CLI - compile pipeline assets into warehouse-ready SQL

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{lint, render};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Render(args) => render::execute(args, &cli.global),
        cli::Commands::Lint(args) => lint::execute(args, &cli.global),
    }
}

/// `--verbose` raises the default filter to debug; `RUST_LOG` still wins.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
