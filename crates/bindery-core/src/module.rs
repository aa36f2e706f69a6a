//! Modules: named, immutable binding configurations.

use std::sync::Arc;

use bindery_aop::{Bind, Candidate, Pointcut};
use bindery_common::error::Result;
use bindery_common::types::ClassId;

use crate::binder::Binder;
use crate::context::ModuleContext;
use crate::registry::{BindingKey, BindingRegistry, BindingSpec, QualifierMap};

/// A configuration routine that declares bindings on a [`Binder`].
pub trait Configure {
    /// Name used in logs and error messages.
    fn name(&self) -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_owned()
    }

    /// Declares this module's bindings and pointcuts.
    ///
    /// # Errors
    ///
    /// Any error aborts construction of the module.
    fn configure(&self, binder: &mut Binder) -> Result<()>;
}

/// A constructed module.
///
/// The registry is sealed once construction finishes; later writes through
/// [`Module::insert`] or [`Module::remove`] fail with
/// [`ReadOnly`](bindery_common::error::BinderyError::ReadOnly).
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    registry: BindingRegistry,
    pointcuts: Vec<Pointcut>,
    context: Arc<ModuleContext>,
}

impl Module {
    /// Runs `config` against an empty binder and seals the result.
    ///
    /// # Errors
    ///
    /// Returns whatever the configuration routine raised, or a configuration
    /// error if a binding was started without a target.
    pub fn new<C: Configure + ?Sized>(config: &C, context: &Arc<ModuleContext>) -> Result<Self> {
        Self::build(config, Arc::clone(context), BindingRegistry::new(), Vec::new())
    }

    /// Builds `config` on top of `inner`.
    ///
    /// The inner module's bindings come first; keys `config` binds again are
    /// overwritten in place.
    ///
    /// # Errors
    ///
    /// Same as [`Module::new`].
    pub fn decorate<C: Configure + ?Sized>(inner: Self, config: &C) -> Result<Self> {
        let Self {
            name,
            registry,
            pointcuts,
            context,
        } = inner;
        tracing::debug!(inner = %name, "decorating module");
        Self::build(config, context, registry, pointcuts)
    }

    fn build<C: Configure + ?Sized>(
        config: &C,
        context: Arc<ModuleContext>,
        registry: BindingRegistry,
        pointcuts: Vec<Pointcut>,
    ) -> Result<Self> {
        let name = config.name();
        tracing::debug!(module = %name, "configuring module");
        let mut binder = Binder::new(name.clone(), Arc::clone(&context), registry, pointcuts);
        if let Err(err) = config.configure(&mut binder) {
            tracing::warn!(module = %name, error = %err, "module configuration failed");
            return Err(err);
        }
        let (mut registry, pointcuts) = binder.finish()?;
        registry.seal();
        tracing::info!(
            module = %name,
            interfaces = registry.len(),
            bindings = registry.binding_count(),
            pointcuts = pointcuts.len(),
            "module constructed"
        );
        Ok(Self {
            name,
            registry,
            pointcuts,
            context,
        })
    }

    pub(crate) const fn from_parts(
        name: String,
        registry: BindingRegistry,
        pointcuts: Vec<Pointcut>,
        context: Arc<ModuleContext>,
    ) -> Self {
        Self {
            name,
            registry,
            pointcuts,
            context,
        }
    }

    /// Returns a new module holding `self`'s bindings followed by the keys of
    /// `other` that `self` does not bind.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        let added = merged.registry.merge_from(&other.registry);
        merged.pointcuts.extend(other.pointcuts.iter().cloned());
        tracing::debug!(module = %self.name, other = %other.name, added, "merged modules");
        merged
    }

    /// Module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sealed binding registry.
    #[must_use]
    pub const fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    /// Qualifier map of `interface`.
    #[must_use]
    pub fn get(&self, interface: &str) -> Option<&QualifierMap> {
        self.registry.get(interface)
    }

    /// Returns `true` if `interface` has at least one binding.
    #[must_use]
    pub fn contains(&self, interface: &str) -> bool {
        self.registry.contains(interface)
    }

    /// Binding for `interface` under `qualifier` (unspecified when `None`).
    #[must_use]
    pub fn lookup(&self, interface: &str, qualifier: Option<&str>) -> Option<&BindingSpec> {
        self.registry.resolve(interface, qualifier)
    }

    /// Registered pointcuts in registration order.
    #[must_use]
    pub fn pointcuts(&self) -> &[Pointcut] {
        &self.pointcuts
    }

    /// Collaborators the module was built with.
    #[must_use]
    pub const fn context(&self) -> &Arc<ModuleContext> {
        &self.context
    }

    /// Always fails: a constructed module is read-only.
    ///
    /// # Errors
    ///
    /// Returns [`ReadOnly`](bindery_common::error::BinderyError::ReadOnly).
    pub fn insert(&mut self, key: BindingKey, spec: BindingSpec) -> Result<()> {
        self.registry.insert(key, spec)
    }

    /// Always fails: a constructed module is read-only.
    ///
    /// # Errors
    ///
    /// Returns [`ReadOnly`](bindery_common::error::BinderyError::ReadOnly).
    pub fn remove(&mut self, interface: &str) -> Result<Option<QualifierMap>> {
        self.registry.remove(interface)
    }

    /// Feeds every pointcut whose class matcher accepts `class` into `bind`.
    ///
    /// Returns `None` when no pointcut applies to the class.
    #[must_use]
    pub fn weave(&self, class: &ClassId, mut bind: Bind) -> Option<Bind> {
        let reader = &self.context.reader;
        let annotations = reader.class_annotations(class);
        let ancestors = reader.ancestors(class);
        let candidate = Candidate::named(class.normalized())
            .with_annotations(&annotations)
            .with_ancestors(&ancestors);

        let mut matched = 0_usize;
        for pointcut in &self.pointcuts {
            if pointcut.class_matcher.matches(&candidate) {
                bind.bind(
                    pointcut.method_matcher.clone(),
                    pointcut.interceptors.clone(),
                );
                matched += 1;
            }
        }
        tracing::debug!(module = %self.name, %class, matched, "weaving class");
        (matched > 0).then_some(bind)
    }

    /// Shorthand for [`Module::weave`] with a fresh [`Bind`].
    #[must_use]
    pub fn aspects_for(&self, class: &ClassId) -> Option<Bind> {
        self.weave(class, Bind::new(class.clone(), Arc::clone(&self.context.reader)))
    }
}

#[cfg(test)]
mod tests {
    use bindery_aop::{InterceptorRegistry, Matcher};
    use bindery_common::config::BinderyConfig;

    use super::*;
    use crate::catalog::ClassManifest;

    struct DbModule;

    impl Configure for DbModule {
        fn configure(&self, binder: &mut Binder) -> Result<()> {
            binder.bind("App\\DbInterface").to("App\\UserDb")
        }
    }

    struct Dangling;

    impl Configure for Dangling {
        fn name(&self) -> String {
            "Dangling".into()
        }

        fn configure(&self, binder: &mut Binder) -> Result<()> {
            let _ = binder.bind("App\\DbInterface");
            Ok(())
        }
    }

    struct Taxed;

    impl Configure for Taxed {
        fn configure(&self, binder: &mut Binder) -> Result<()> {
            binder.bind_interceptor(
                Matcher::subclass_of("App\\BillingInterface"),
                Matcher::annotated_with("Tax"),
                &["App\\TaxCharger"],
            )
        }
    }

    fn context() -> Arc<ModuleContext> {
        let manifest = ClassManifest::new()
            .with_ancestor("App\\RealBilling", "App\\BillingInterface")
            .with_method("App\\RealBilling", "chargeOrder", &["Tax"]);
        ModuleContext::from_manifest(
            BinderyConfig::default(),
            manifest,
            InterceptorRegistry::new().register_named("App\\TaxCharger"),
        )
        .shared()
    }

    #[test]
    fn default_name_is_type_name() {
        assert_eq!(DbModule.name(), "DbModule");
    }

    #[test]
    fn constructed_module_is_sealed() {
        let mut module = Module::new(&DbModule, &context()).expect("module");
        assert!(module.registry().is_sealed());
        let err = module.remove("App\\DbInterface").unwrap_err();
        assert!(err.is_read_only());
        assert!(module.contains("App\\DbInterface"));
    }

    #[test]
    fn incomplete_binding_fails_construction() {
        let err = Module::new(&Dangling, &context()).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Dangling"));
    }

    #[test]
    fn merged_leaves_original_untouched() {
        let context = context();
        let db = Module::new(&DbModule, &context).expect("db");
        let taxed = Module::new(&Taxed, &context).expect("taxed");
        let merged = taxed.merged(&db);
        assert!(merged.contains("App\\DbInterface"));
        assert!(!taxed.contains("App\\DbInterface"));
        assert_eq!(merged.pointcuts().len(), 1);
    }

    #[test]
    fn weave_uses_ancestry_and_method_tags() {
        let module = Module::new(&Taxed, &context()).expect("module");
        let bind = module
            .aspects_for(&ClassId::new("\\App\\RealBilling"))
            .expect("subclass matches");
        assert!(bind.interceptors("chargeOrder").is_some());
        assert!(bind.interceptors("refund").is_none());
        assert!(module.aspects_for(&ClassId::new("App\\Other")).is_none());
    }
}
