//! Class catalog seam.
//!
//! The engine never inspects class structure. Whether a target exists, and
//! whether a provider target really is a provider, is answered by an
//! external [`ClassCatalog`]. [`ClassManifest`] is a declarative catalog that
//! also serves annotation metadata to the aspect matcher.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use bindery_aop::AttributeReader;
use bindery_common::error::{BinderyError, Result};
use bindery_common::types::ClassId;
use serde::{Deserialize, Serialize};

/// Answers structural questions about classes during binding.
pub trait ClassCatalog: fmt::Debug + Send + Sync {
    /// Returns `true` if `class` exists.
    fn contains(&self, class: &ClassId) -> bool;

    /// Returns `true` if `class` implements the single-value provider capability.
    fn is_provider(&self, class: &ClassId) -> bool;
}

/// Metadata of one class in a [`ClassManifest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassEntry {
    /// Implements the provider capability.
    pub provider: bool,
    /// Usable as an interceptor type.
    pub interceptor: bool,
    /// Class-level annotation tags.
    pub annotations: Vec<String>,
    /// Method name → annotation tags.
    pub methods: BTreeMap<String, Vec<String>>,
    /// Parent classes and implemented interfaces.
    pub ancestors: Vec<String>,
}

/// A declarative class catalog and attribute reader.
///
/// Class names are stored without a leading namespace separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassManifest {
    /// Known classes by name.
    #[serde(default)]
    pub classes: BTreeMap<String, ClassEntry>,
}

impl ClassManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a manifest from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading class manifest");
        let content = std::fs::read_to_string(path).map_err(|source| BinderyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Declares a plain class.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        let _ = self.entry(class);
        self
    }

    /// Declares a provider class.
    #[must_use]
    pub fn with_provider(mut self, class: &str) -> Self {
        self.entry(class).provider = true;
        self
    }

    /// Declares an interceptor class.
    #[must_use]
    pub fn with_interceptor(mut self, class: &str) -> Self {
        self.entry(class).interceptor = true;
        self
    }

    /// Adds a class-level annotation.
    #[must_use]
    pub fn with_class_annotation(mut self, class: &str, tag: &str) -> Self {
        self.entry(class).annotations.push(tag.to_owned());
        self
    }

    /// Declares a method, optionally annotated with `tags`.
    #[must_use]
    pub fn with_method(mut self, class: &str, method: &str, tags: &[&str]) -> Self {
        let methods = &mut self.entry(class).methods;
        methods
            .entry(method.to_owned())
            .or_default()
            .extend(tags.iter().map(|t| (*t).to_owned()));
        self
    }

    /// Records that `class` derives from or implements `ancestor`.
    #[must_use]
    pub fn with_ancestor(mut self, class: &str, ancestor: &str) -> Self {
        self.entry(class).ancestors.push(ancestor.to_owned());
        self
    }

    /// Metadata of `class`, if known.
    #[must_use]
    pub fn class(&self, class: &ClassId) -> Option<&ClassEntry> {
        self.classes.get(class.normalized())
    }

    /// Names of every class flagged as interceptor.
    pub fn interceptor_types(&self) -> impl Iterator<Item = &str> {
        self.classes
            .iter()
            .filter(|(_, entry)| entry.interceptor)
            .map(|(name, _)| name.as_str())
    }

    fn entry(&mut self, class: &str) -> &mut ClassEntry {
        let name = ClassId::new(class).normalized().to_owned();
        self.classes.entry(name).or_default()
    }
}

impl ClassCatalog for ClassManifest {
    fn contains(&self, class: &ClassId) -> bool {
        self.class(class).is_some()
    }

    fn is_provider(&self, class: &ClassId) -> bool {
        self.class(class).is_some_and(|entry| entry.provider)
    }
}

impl AttributeReader for ClassManifest {
    fn class_annotations(&self, class: &ClassId) -> Vec<String> {
        self.class(class)
            .map(|entry| entry.annotations.clone())
            .unwrap_or_default()
    }

    fn method_annotations(&self, class: &ClassId, method: &str) -> Vec<String> {
        self.class(class)
            .and_then(|entry| entry.methods.get(method))
            .cloned()
            .unwrap_or_default()
    }

    fn ancestors(&self, class: &ClassId) -> Vec<String> {
        self.class(class)
            .map(|entry| entry.ancestors.clone())
            .unwrap_or_default()
    }
}
