//! Collaborators shared by every module built together.

use std::sync::Arc;

use bindery_aop::{AttributeReader, InterceptorRegistry, NoAttributes};
use bindery_common::config::BinderyConfig;

use crate::catalog::{ClassCatalog, ClassManifest};

/// Configuration plus the external collaborators consulted while binding.
#[derive(Debug, Clone)]
pub struct ModuleContext {
    /// Engine configuration.
    pub config: BinderyConfig,
    /// Class existence and provider checks.
    pub catalog: Arc<dyn ClassCatalog>,
    /// Annotation metadata for aspect matching.
    pub reader: Arc<dyn AttributeReader>,
    /// Interceptor types available to pointcuts.
    pub interceptors: InterceptorRegistry,
}

impl ModuleContext {
    /// Creates a context from its parts.
    pub fn new(
        config: BinderyConfig,
        catalog: Arc<dyn ClassCatalog>,
        reader: Arc<dyn AttributeReader>,
        interceptors: InterceptorRegistry,
    ) -> Self {
        Self {
            config,
            catalog,
            reader,
            interceptors,
        }
    }

    /// Uses one manifest as both the class catalog and the attribute reader.
    #[must_use]
    pub fn from_manifest(
        config: BinderyConfig,
        manifest: ClassManifest,
        interceptors: InterceptorRegistry,
    ) -> Self {
        let manifest = Arc::new(manifest);
        Self::new(config, manifest.clone(), manifest, interceptors)
    }

    /// Wraps the context for sharing between modules.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for ModuleContext {
    fn default() -> Self {
        Self::new(
            BinderyConfig::default(),
            Arc::new(ClassManifest::new()),
            Arc::new(NoAttributes),
            InterceptorRegistry::new(),
        )
    }
}
