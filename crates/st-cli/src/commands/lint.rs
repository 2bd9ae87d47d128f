//! Lint command implementation — advisory pipeline checks.

use anyhow::{bail, Context, Result};
use st_core::{ensure_no_cycles, Pipeline};

use crate::cli::{GlobalArgs, LintArgs};

/// Execute the lint command
pub fn execute(args: &LintArgs, _global: &GlobalArgs) -> Result<()> {
    let pipeline = Pipeline::from_path(&args.pipeline).context("Failed to load pipeline")?;

    let issues = ensure_no_cycles(&pipeline);
    if issues.is_empty() {
        println!(
            "No issues found in pipeline `{}` ({} asset(s) checked).",
            pipeline.name,
            pipeline.assets.len()
        );
        return Ok(());
    }

    for issue in &issues {
        println!("{}", issue.description);
        for line in &issue.context {
            println!("  {line}");
        }
    }
    bail!("{} issue(s) found", issues.len());
}
