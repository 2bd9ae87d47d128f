//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use st_materialize::Dialect;

/// Strata - compile pipeline assets into warehouse-ready SQL
#[derive(Parser, Debug)]
#[command(name = "st")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile asset queries into materialization statements
    Render(RenderArgs),

    /// Check a pipeline for advisory issues
    Lint(LintArgs),
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the pipeline YAML file
    #[arg(short, long)]
    pub pipeline: PathBuf,

    /// Target warehouse dialect
    #[arg(short, long)]
    pub dialect: Dialect,

    /// Render a single asset by name (default: all)
    #[arg(short, long)]
    pub asset: Option<String>,

    /// Rebuild tables from scratch instead of updating incrementally
    #[arg(long)]
    pub full_refresh: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: RenderFormat,
}

/// Render output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// Statements as plain text, one block per asset
    Text,
    /// JSON document keyed by asset name
    Json,
}

/// Arguments for the lint command
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Path to the pipeline YAML file
    #[arg(short, long)]
    pub pipeline: PathBuf,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
