//! `bindery check`: Build a module definition and summarise it.

use std::fmt::Write as _;
use std::path::PathBuf;

use bindery_core::Module;
use clap::Args;

use super::Session;
use crate::output;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the .bind definition file.
    #[arg(default_value = bindery_common::constants::DEFAULT_DEFINITION_FILE)]
    pub file: PathBuf,
}

/// Executes the `check` command.
///
/// # Errors
///
/// Returns an error if the definition cannot be loaded or built.
pub fn execute(args: &CheckArgs, session: &Session) -> anyhow::Result<()> {
    let module = session.load(&args.file)?;
    print!("{}", summary(&module));
    Ok(())
}

fn summary(module: &Module) -> String {
    let registry = module.registry();
    let mut out = output::heading(&format!("Module: {}", module.name()));
    let _ = writeln!(out, "  {}", output::count(registry.len(), "interface"));
    let _ = writeln!(out, "  {}", output::count(registry.binding_count(), "binding"));
    let _ = writeln!(out, "  {}", output::count(module.pointcuts().len(), "pointcut"));
    out.push_str("\nOK\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GlobalArgs;

    #[test]
    fn summary_counts_interfaces_and_bindings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("app.bind");
        std::fs::write(
            &file,
            r"
bind('')->annotatedWith('user_name')->toInstance('koriym')
bind('')->annotatedWith('user_age')->toInstance(21)
bind('App\DbInterface')->to('App\UserDb')
",
        )
        .expect("write");

        let session = Session::open(&GlobalArgs::default()).expect("session");
        let module = session.load(&file).expect("load");
        let text = summary(&module);
        assert!(text.starts_with("Module: app\n"));
        assert!(text.contains("2 interfaces"));
        assert!(text.contains("3 bindings"));
        assert!(text.contains("0 pointcuts"));
    }

    #[test]
    fn check_fails_on_invalid_provider() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("app.bind");
        std::fs::write(&file, r"bind('App\DbInterface')->toProvider('App\UserDb')").expect("write");

        let session = Session::open(&GlobalArgs::default()).expect("session");
        let err = execute(&CheckArgs { file }, &session).unwrap_err();
        assert!(format!("{err:#}").contains("provider capability"));
    }
}
