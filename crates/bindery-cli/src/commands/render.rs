//! `bindery render`: Print the canonical text form of a module definition.

use std::path::PathBuf;

use clap::Args;

use super::Session;

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the .bind definition file.
    #[arg(default_value = bindery_common::constants::DEFAULT_DEFINITION_FILE)]
    pub file: PathBuf,
}

/// Executes the `render` command.
///
/// # Errors
///
/// Returns an error if the definition cannot be loaded or built.
pub fn execute(args: &RenderArgs, session: &Session) -> anyhow::Result<()> {
    tracing::info!(file = %args.file.display(), "rendering module");
    print!("{}", report(args, session)?);
    Ok(())
}

fn report(args: &RenderArgs, session: &Session) -> anyhow::Result<String> {
    Ok(session.load(&args.file)?.to_string())
}
