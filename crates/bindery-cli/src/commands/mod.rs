//! CLI command definitions and dispatch.

pub mod aspects;
pub mod check;
pub mod plan;
pub mod render;
pub mod restore;
pub mod snapshot;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use bindery_aop::InterceptorRegistry;
use bindery_common::config::BinderyConfig;
use bindery_core::{ClassManifest, Module, ModuleContext};
use clap::{Args, Parser, Subcommand};

/// Bindery: dependency-binding module tooling.
#[derive(Parser, Debug)]
#[command(name = bindery_common::constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Engine configuration (JSON).
    #[arg(long, global = true, env = "BINDERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Class manifest (JSON) used as class catalog and attribute reader.
    #[arg(long, global = true, env = "BINDERY_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the canonical text form of a module definition.
    Render(render::RenderArgs),
    /// Build a module definition and summarise it.
    Check(check::CheckArgs),
    /// Show the interceptors woven into a class.
    Aspects(aspects::AspectsArgs),
    /// Show the order in which installed files are built.
    Plan(plan::PlanArgs),
    /// Save a structural snapshot of a module.
    Snapshot(snapshot::SnapshotArgs),
    /// Restore a module from a snapshot and print it.
    Restore(restore::RestoreArgs),
}

/// Configuration, manifest and the module context built from them.
#[derive(Debug)]
pub struct Session {
    /// Loaded class manifest, empty when none was given.
    pub manifest: ClassManifest,
    /// Context handed to every module.
    pub context: Arc<ModuleContext>,
}

impl Session {
    /// Loads the configuration and manifest named by `global`.
    ///
    /// Every manifest class flagged as interceptor is registered as an opaque
    /// interceptor type.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed.
    pub fn open(global: &GlobalArgs) -> anyhow::Result<Self> {
        let config = match &global.config {
            Some(path) => BinderyConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => BinderyConfig::default(),
        };
        let manifest = match &global.manifest {
            Some(path) => ClassManifest::load(path)
                .with_context(|| format!("failed to load manifest {}", path.display()))?,
            None => ClassManifest::new(),
        };

        let interceptors = manifest
            .interceptor_types()
            .fold(InterceptorRegistry::new(), InterceptorRegistry::register_named);
        tracing::debug!(
            classes = manifest.classes.len(),
            interceptors = interceptors.len(),
            "opened session"
        );

        let context = ModuleContext::from_manifest(config, manifest.clone(), interceptors).shared();
        Ok(Self { manifest, context })
    }

    /// Loads and builds the module defined at `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition tree cannot be loaded or built.
    pub fn load(&self, file: &std::path::Path) -> anyhow::Result<Module> {
        bindery_compose::load_module(file, &self.context)
            .with_context(|| format!("failed to load module {}", file.display()))
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let session = Session::open(&cli.global)?;
    match cli.command {
        Command::Render(args) => render::execute(&args, &session),
        Command::Check(args) => check::execute(&args, &session),
        Command::Aspects(args) => aspects::execute(&args, &session),
        Command::Snapshot(args) => snapshot::execute(&args, &session),
        Command::Restore(args) => restore::execute(&args, &session),
        Command::Plan(args) => plan::execute(&args),
    }
}
