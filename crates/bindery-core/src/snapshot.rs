//! Structural save and restore of a constructed module.
//!
//! A snapshot stores the registry as data and each pointcut as its matcher
//! variants plus interceptor type identifiers. Interceptor objects are not
//! stored; restore rebuilds them through the context's interceptor registry.

use std::path::Path;
use std::sync::Arc;

use bindery_aop::PointcutSnapshot;
use bindery_common::constants::SNAPSHOT_VERSION;
use bindery_common::error::{BinderyError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::ModuleContext;
use crate::module::Module;
use crate::registry::BindingRegistry;

/// Serializable form of a [`Module`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    /// Snapshot format version.
    pub version: u32,
    /// Name of the captured module.
    pub name: String,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// Captured bindings in registry order.
    pub bindings: BindingRegistry,
    /// Captured pointcuts in registration order.
    pub pointcuts: Vec<PointcutSnapshot>,
}

impl Module {
    /// Captures this module as data.
    #[must_use]
    pub fn snapshot(&self) -> ModuleSnapshot {
        ModuleSnapshot {
            version: SNAPSHOT_VERSION,
            name: self.name().to_owned(),
            saved_at: Utc::now(),
            bindings: self.registry().clone(),
            pointcuts: self.pointcuts().iter().map(|p| p.snapshot()).collect(),
        }
    }
}

impl ModuleSnapshot {
    /// Rebuilds a sealed module equivalent to the captured one.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unsupported version, a binding
    /// key listed twice, or an interceptor type missing from `context`'s
    /// registry.
    pub fn restore(&self, context: &Arc<ModuleContext>) -> Result<Module> {
        if self.version != SNAPSHOT_VERSION {
            return Err(BinderyError::configuration(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }
        self.bindings.check_unique()?;
        let pointcuts = self
            .pointcuts
            .iter()
            .map(|p| p.restore(&context.interceptors))
            .collect::<Result<Vec<_>>>()?;
        let mut registry = self.bindings.clone();
        registry.seal();
        tracing::info!(
            module = %self.name,
            saved_at = %self.saved_at,
            bindings = registry.binding_count(),
            pointcuts = pointcuts.len(),
            "restored module snapshot"
        );
        Ok(Module::from_parts(
            self.name.clone(),
            registry,
            pointcuts,
            Arc::clone(context),
        ))
    }

    /// Encodes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the snapshot to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| BinderyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), module = %self.name, "saved snapshot");
        Ok(())
    }

    /// Reads a snapshot from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or decoding fails.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| BinderyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
