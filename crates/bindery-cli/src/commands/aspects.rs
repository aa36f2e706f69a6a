//! `bindery aspects`: Show the interceptors woven into a class.

use std::fmt::Write as _;
use std::path::PathBuf;

use bindery_common::types::ClassId;
use bindery_core::Module;
use clap::Args;

use super::Session;
use crate::output;

/// Arguments for the `aspects` command.
#[derive(Args, Debug)]
pub struct AspectsArgs {
    /// Path to the .bind definition file.
    #[arg(default_value = bindery_common::constants::DEFAULT_DEFINITION_FILE)]
    pub file: PathBuf,

    /// Target class to weave.
    #[arg(long = "class")]
    pub class: String,

    /// Methods to query; defaults to the methods the manifest lists for the class.
    #[arg(long = "method")]
    pub methods: Vec<String>,
}

/// Executes the `aspects` command.
///
/// # Errors
///
/// Returns an error if the definition cannot be loaded or built.
pub fn execute(args: &AspectsArgs, session: &Session) -> anyhow::Result<()> {
    let module = session.load(&args.file)?;
    print!("{}", report(&module, args, session));
    Ok(())
}

fn report(module: &Module, args: &AspectsArgs, session: &Session) -> String {
    let class = ClassId::new(args.class.as_str());
    let Some(bind) = module.aspects_for(&class) else {
        return format!("no pointcut matches {class}\n");
    };

    let methods: Vec<String> = if args.methods.is_empty() {
        session
            .manifest
            .class(&class)
            .map(|entry| entry.methods.keys().cloned().collect())
            .unwrap_or_default()
    } else {
        args.methods.clone()
    };

    let mut out = output::heading(&format!("Aspects of {class}"));
    let _ = writeln!(out, "  {}", output::count(bind.len(), "method matcher"));
    for method in &methods {
        match bind.interceptors(method) {
            Some(interceptors) => {
                let _ = writeln!(out, "  {method}: {}", output::format_interceptors(interceptors));
            }
            None => {
                let _ = writeln!(out, "  {method}: (none)");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GlobalArgs;

    fn session(dir: &std::path::Path) -> Session {
        let manifest = dir.join("classes.json");
        std::fs::write(
            &manifest,
            r#"{
  "classes": {
    "App\\TaxCharger": { "interceptor": true },
    "App\\RealBillingService": {
      "methods": { "chargeOrder": ["Tax"], "chargeOrderWithNoTax": [] }
    }
  }
}"#,
        )
        .expect("write manifest");
        Session::open(&GlobalArgs {
            manifest: Some(manifest),
            ..GlobalArgs::default()
        })
        .expect("session")
    }

    fn args(file: PathBuf, class: &str, methods: &[&str]) -> AspectsArgs {
        AspectsArgs {
            file,
            class: class.into(),
            methods: methods.iter().map(|m| (*m).to_owned()).collect(),
        }
    }

    #[test]
    fn lists_manifest_methods_by_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("aop.bind");
        std::fs::write(
            &file,
            r"bindInterceptor(any(), annotatedWith('Tax'), ['App\TaxCharger'])",
        )
        .expect("write");
        let session = session(dir.path());
        let module = session.load(&file).expect("load");

        let text = report(&module, &args(file, "App\\RealBillingService", &[]), &session);
        assert!(text.contains("chargeOrder: App\\TaxCharger"), "got: {text}");
        assert!(text.contains("chargeOrderWithNoTax: (none)"), "got: {text}");
    }

    #[test]
    fn unmatched_class_reports_no_pointcut() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("aop.bind");
        std::fs::write(
            &file,
            r"bindInterceptor(subclassOf('App\Billing'), any(), ['App\TaxCharger'])",
        )
        .expect("write");
        let session = session(dir.path());
        let module = session.load(&file).expect("load");

        let text = report(&module, &args(file, "App\\Other", &["run"]), &session);
        assert_eq!(text, "no pointcut matches App\\Other\n");
    }
}
