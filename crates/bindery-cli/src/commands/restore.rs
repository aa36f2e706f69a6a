//! `bindery restore`: Restore a module from a snapshot and print it.

use std::path::PathBuf;

use anyhow::Context as _;
use bindery_core::{Module, ModuleSnapshot};
use clap::Args;

use super::Session;

/// Arguments for the `restore` command.
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Path to a JSON snapshot written by `bindery snapshot`.
    pub snapshot: PathBuf,
}

/// Executes the `restore` command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or restored.
pub fn execute(args: &RestoreArgs, session: &Session) -> anyhow::Result<()> {
    let module = restore(args, session)?;
    print!("{module}");
    Ok(())
}

fn restore(args: &RestoreArgs, session: &Session) -> anyhow::Result<Module> {
    let snapshot = ModuleSnapshot::load(&args.snapshot)
        .with_context(|| format!("failed to read snapshot {}", args.snapshot.display()))?;
    snapshot
        .restore(&session.context)
        .with_context(|| format!("failed to restore module {}", snapshot.name))
}
