//! `bindery plan`: Show the order in which installed files are built.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;

use crate::output;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the .bind definition file.
    #[arg(default_value = bindery_common::constants::DEFAULT_DEFINITION_FILE)]
    pub file: PathBuf,
}

/// Executes the `plan` command.
///
/// Parses the definition and everything it installs, resolves the install
/// graph and prints the build order.
///
/// # Errors
///
/// Returns an error if parsing, install resolution or graph ordering fails.
pub fn execute(args: &PlanArgs) -> anyhow::Result<()> {
    print!("{}", report(&args.file)?);
    Ok(())
}

fn report(file: &Path) -> anyhow::Result<String> {
    let order = bindery_compose::plan(file)
        .with_context(|| format!("failed to plan {}", file.display()))?;
    let base = order
        .last()
        .and_then(|root| root.parent())
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut out = output::heading(&format!("Build Plan for: {}", file.display()));
    out.push('\n');
    for (step, path) in order.iter().enumerate() {
        let shown = path.strip_prefix(&base).unwrap_or(path);
        let _ = writeln!(out, "  {}. {}", step + 1, shown.display());
    }
    let _ = writeln!(out, "\n  {} will be built.", output::count(order.len(), "file"));
    Ok(out)
}
