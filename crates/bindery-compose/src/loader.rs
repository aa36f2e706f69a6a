//! Loads a definition file together with everything it installs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bindery_common::error::{BinderyError, Result};
use bindery_core::{Module, ModuleContext};

use crate::definition::DefinitionModule;
use crate::graph::InstallGraph;
use crate::import::{canonical, read_definition, resolve_install};
use crate::parser::ast::DefinitionFile;

/// One parsed file of an install tree.
#[derive(Debug, Clone)]
pub struct DefinitionUnit {
    /// Canonical path of the file.
    pub path: PathBuf,
    /// Parsed statements.
    pub file: DefinitionFile,
    /// Install source, as written, to canonical path.
    pub installs: BTreeMap<String, PathBuf>,
}

impl DefinitionUnit {
    /// Module name derived from the file stem.
    #[must_use]
    pub fn name(&self) -> String {
        self.path.file_stem().map_or_else(
            || self.path.display().to_string(),
            |stem| stem.to_string_lossy().into_owned(),
        )
    }
}

/// A root definition file and every file reachable through `install`.
#[derive(Debug, Clone)]
pub struct DefinitionTree {
    /// Canonical path of the root file.
    pub root: PathBuf,
    /// Files keyed by canonical path.
    pub units: BTreeMap<PathBuf, DefinitionUnit>,
    /// Build order: installed files before their installers, root last.
    pub order: Vec<PathBuf>,
}

impl DefinitionTree {
    /// Parses `path` and every file it transitively installs.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing, unreadable, malformed, or if
    /// installs are cyclic.
    pub fn load(path: &Path) -> Result<Self> {
        let root = canonical(path)?;
        tracing::info!(root = %root.display(), "loading definition tree");

        let mut graph = InstallGraph::new();
        let mut units = BTreeMap::new();
        let mut pending = vec![root.clone()];

        while let Some(current) = pending.pop() {
            if units.contains_key(&current) {
                continue;
            }
            let file = read_definition(&current)?;
            let base_dir = current.parent().unwrap_or_else(|| Path::new("."));
            let node = graph.add_file(&current);

            let mut installs = BTreeMap::new();
            for install in file.installs() {
                let resolved = resolve_install(&install.source, base_dir)?;
                let installed = graph.add_file(&resolved);
                graph.add_install(node, installed);
                pending.push(resolved.clone());
                let _ = installs.insert(install.source.clone(), resolved);
            }
            let _ = units.insert(
                current.clone(),
                DefinitionUnit {
                    path: current,
                    file,
                    installs,
                },
            );
        }

        let order = graph.build_order()?;
        tracing::debug!(files = order.len(), "resolved install order");
        Ok(Self { root, units, order })
    }

    /// Builds every module dependency-first and returns the root module.
    ///
    /// # Errors
    ///
    /// Propagates the first module construction failure.
    pub fn build(&self, context: &Arc<ModuleContext>) -> Result<Module> {
        let mut built: BTreeMap<&Path, Module> = BTreeMap::new();
        for path in &self.order {
            let Some(unit) = self.units.get(path) else {
                continue;
            };
            let module = {
                let mut definition = DefinitionModule::new(unit.name(), &unit.file);
                for (source, target) in &unit.installs {
                    if let Some(installed) = built.get(target.as_path()) {
                        definition = definition.with_installed(source.as_str(), installed);
                    }
                }
                Module::new(&definition, context)?
            };
            let _ = built.insert(path.as_path(), module);
        }
        built
            .remove(self.root.as_path())
            .ok_or_else(|| BinderyError::NotFound {
                kind: "definition file",
                id: self.root.display().to_string(),
            })
    }
}

/// Loads the definition at `path` and builds its module.
///
/// # Errors
///
/// Returns any loading or construction failure.
pub fn load_module(path: &Path, context: &Arc<ModuleContext>) -> Result<Module> {
    let tree = DefinitionTree::load(path)?;
    let module = tree.build(context)?;
    tracing::info!(
        module = module.name(),
        files = tree.order.len(),
        bindings = module.registry().binding_count(),
        "loaded module definition"
    );
    Ok(module)
}

/// Returns the build order of the definition at `path`.
///
/// # Errors
///
/// Returns any loading failure.
pub fn plan(path: &Path) -> Result<Vec<PathBuf>> {
    Ok(DefinitionTree::load(path)?.order)
}
