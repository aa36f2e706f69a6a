//! `bindery snapshot`: Save a structural snapshot of a module.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use super::Session;

/// Arguments for the `snapshot` command.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Path to the .bind definition file.
    #[arg(default_value = bindery_common::constants::DEFAULT_DEFINITION_FILE)]
    pub file: PathBuf,

    /// Where to write the JSON snapshot.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Executes the `snapshot` command.
///
/// # Errors
///
/// Returns an error if the module cannot be built or the snapshot written.
pub fn execute(args: &SnapshotArgs, session: &Session) -> anyhow::Result<()> {
    let module = session.load(&args.file)?;
    let snapshot = module.snapshot();
    snapshot
        .save(&args.output)
        .with_context(|| format!("failed to write snapshot {}", args.output.display()))?;
    tracing::info!(
        module = module.name(),
        output = %args.output.display(),
        "snapshot saved"
    );
    println!(
        "Saved {} ({} bindings, {} pointcuts) to {}",
        module.name(),
        module.registry().binding_count(),
        module.pointcuts().len(),
        args.output.display()
    );
    Ok(())
}
