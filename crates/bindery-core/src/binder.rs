//! Fluent binder used while a module is being configured.
//!
//! ```text
//! binder.bind("App\\DbInterface").to("App\\UserDb")?;
//! binder.bind("").annotated_with("user_name").to_instance("koriym")?;
//! ```
//!
//! Every terminal call validates its target immediately, so a bad binding
//! fails the module that declared it and nothing else. The first failure is
//! also kept by the binder, so the module fails even when the configuration
//! routine ignores the returned error.

use std::sync::Arc;

use bindery_aop::{Matcher, Pointcut};
use bindery_common::error::{BinderyError, Result};
use bindery_common::types::{ClassId, Qualifier, is_valid_class_name};

use crate::context::ModuleContext;
use crate::module::{Configure, Module};
use crate::registry::{BindingKey, BindingRegistry, BindingSpec, InstanceValue};

/// Construction-phase write access to a module's bindings and pointcuts.
#[derive(Debug)]
pub struct Binder {
    module: String,
    context: Arc<ModuleContext>,
    registry: BindingRegistry,
    pointcuts: Vec<Pointcut>,
    incomplete: Vec<BindingKey>,
    failure: Option<BinderyError>,
}

impl Binder {
    pub(crate) const fn new(
        module: String,
        context: Arc<ModuleContext>,
        registry: BindingRegistry,
        pointcuts: Vec<Pointcut>,
    ) -> Self {
        Self {
            module,
            context,
            registry,
            pointcuts,
            incomplete: Vec::new(),
            failure: None,
        }
    }

    /// Starts a binding for `interface`.
    pub fn bind(&mut self, interface: impl Into<String>) -> BindingBuilder<'_> {
        BindingBuilder {
            binder: self,
            interface: interface.into(),
            qualifier: None,
            committed: false,
        }
    }

    /// Merges an already constructed module.
    ///
    /// Keys this module already binds are kept; the installed module's other
    /// bindings and all of its pointcuts are appended after the existing ones.
    pub fn install(&mut self, module: &Module) {
        let added = self.registry.merge_from(module.registry());
        self.pointcuts.extend(module.pointcuts().iter().cloned());
        tracing::info!(
            module = %self.module,
            installed = module.name(),
            added,
            pointcuts = module.pointcuts().len(),
            "installed module"
        );
    }

    /// Constructs a module from `config` with this binder's context and
    /// installs it.
    ///
    /// # Errors
    ///
    /// Propagates the installed module's construction failure.
    pub fn install_config<C: Configure + ?Sized>(&mut self, config: &C) -> Result<()> {
        let module = match Module::new(config, &self.context) {
            Ok(module) => module,
            Err(err) => return Err(self.record(err)),
        };
        self.install(&module);
        Ok(())
    }

    /// Attaches interceptors to the methods selected by the two matchers.
    ///
    /// Interceptors are named by type identifier and built through the
    /// context's interceptor registry.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an interceptor type is not registered.
    pub fn bind_interceptor(
        &mut self,
        class_matcher: Matcher,
        method_matcher: Matcher,
        interceptors: &[&str],
    ) -> Result<()> {
        let resolved = interceptors
            .iter()
            .map(|class| self.context.interceptors.resolve(&ClassId::new(*class)))
            .collect::<Result<Vec<_>>>();
        let interceptors = match resolved {
            Ok(interceptors) => interceptors,
            Err(err) => return Err(self.record(err)),
        };
        tracing::debug!(
            module = %self.module,
            ?class_matcher,
            ?method_matcher,
            interceptors = interceptors.len(),
            "binding interceptors"
        );
        self.pointcuts
            .push(Pointcut::new(class_matcher, method_matcher, interceptors));
        Ok(())
    }

    /// Collaborators available to the configuration routine.
    #[must_use]
    pub fn context(&self) -> &ModuleContext {
        &self.context
    }

    pub(crate) fn finish(self) -> Result<(BindingRegistry, Vec<Pointcut>)> {
        if let Some(err) = self.failure {
            return Err(err);
        }
        if let Some(key) = self.incomplete.first() {
            return Err(BinderyError::configuration(format!(
                "binding of \"{}\" (qualifier \"{}\") in module {} has no target",
                key.interface, key.qualifier, self.module
            )));
        }
        Ok((self.registry, self.pointcuts))
    }

    /// Keeps a copy of the first failure and hands `err` back to the caller.
    fn record(&mut self, err: BinderyError) -> BinderyError {
        if self.failure.is_none() {
            let kept = match &err {
                BinderyError::ToBinding { identifier, reason } => {
                    BinderyError::to_binding(identifier.clone(), reason.clone())
                }
                BinderyError::Configuration { message } => {
                    BinderyError::configuration(message.clone())
                }
                other => BinderyError::configuration(other.to_string()),
            };
            self.failure = Some(kept);
        }
        err
    }

    fn commit(&mut self, key: BindingKey, spec: BindingSpec) {
        tracing::debug!(
            module = %self.module,
            interface = %key.interface,
            qualifier = %key.qualifier,
            ?spec,
            "binding"
        );
        self.registry.put(key, spec);
    }

    fn check_interface(&self, interface: &str) -> Result<()> {
        if self.context.config.strict_identifiers
            && !interface.is_empty()
            && !is_valid_class_name(interface)
        {
            return Err(BinderyError::to_binding(
                interface,
                "malformed interface identifier",
            ));
        }
        Ok(())
    }

    fn check_qualifier(qualifier: Option<&Qualifier>) -> Result<()> {
        match qualifier {
            Some(qualifier) if qualifier.is_unspecified() => Err(BinderyError::to_binding(
                qualifier.as_str(),
                "reserved qualifier",
            )),
            _ => Ok(()),
        }
    }

    fn check_class(&self, class: &ClassId) -> Result<()> {
        if self.context.config.strict_identifiers && !class.is_well_formed() {
            return Err(BinderyError::to_binding(
                class.as_str(),
                "malformed class identifier",
            ));
        }
        Ok(())
    }

    fn check_target(&self, class: &ClassId) -> Result<()> {
        self.check_class(class)?;
        if self.context.config.require_known_classes && !self.context.catalog.contains(class) {
            return Err(BinderyError::to_binding(
                class.as_str(),
                "class cannot be resolved",
            ));
        }
        Ok(())
    }

    fn check_provider(&self, class: &ClassId) -> Result<()> {
        self.check_class(class)?;
        if !self.context.catalog.is_provider(class) {
            return Err(BinderyError::configuration(format!(
                "\"{class}\" does not implement the provider capability"
            )));
        }
        Ok(())
    }

    fn check_instance(&self, value: &InstanceValue) -> Result<()> {
        match value {
            InstanceValue::Object(object) => self.check_class(&object.class),
            InstanceValue::Array(items) => items.iter().try_for_each(|i| self.check_instance(i)),
            InstanceValue::String(_) | InstanceValue::Integer(_) => Ok(()),
        }
    }
}

/// A binding under construction; finish it with exactly one terminal call.
///
/// Dropping the builder without a terminal call fails the module.
#[must_use = "a binding takes effect only through to, to_provider or to_instance"]
#[derive(Debug)]
pub struct BindingBuilder<'b> {
    binder: &'b mut Binder,
    interface: String,
    qualifier: Option<Qualifier>,
    committed: bool,
}

impl BindingBuilder<'_> {
    /// Narrows the binding to a qualifier.
    pub fn annotated_with(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(Qualifier::new(qualifier));
        self
    }

    /// Binds to a concrete class.
    ///
    /// # Errors
    ///
    /// Returns [`BinderyError::ToBinding`] for a malformed or unresolvable class.
    pub fn to(mut self, class: impl Into<String>) -> Result<()> {
        self.committed = true;
        let class = ClassId::new(class);
        let checked = self
            .check_key()
            .and_then(|()| self.binder.check_target(&class))
            .map(|()| BindingSpec::ToClass(class));
        self.complete(checked)
    }

    /// Binds to a provider class.
    ///
    /// # Errors
    ///
    /// Returns [`BinderyError::ToBinding`] for a malformed identifier and
    /// [`BinderyError::Configuration`] if the class is not a provider.
    pub fn to_provider(mut self, provider: impl Into<String>) -> Result<()> {
        self.committed = true;
        let provider = ClassId::new(provider);
        let checked = self
            .check_key()
            .and_then(|()| self.binder.check_provider(&provider))
            .map(|()| BindingSpec::ToProvider(provider));
        self.complete(checked)
    }

    /// Binds to a value captured now.
    ///
    /// # Errors
    ///
    /// Returns [`BinderyError::ToBinding`] for a malformed interface or
    /// object class identifier.
    pub fn to_instance(mut self, value: impl Into<InstanceValue>) -> Result<()> {
        self.committed = true;
        let value = value.into();
        let checked = self
            .check_key()
            .and_then(|()| self.binder.check_instance(&value))
            .map(|()| BindingSpec::ToInstance(value));
        self.complete(checked)
    }

    fn check_key(&self) -> Result<()> {
        self.binder.check_interface(&self.interface)?;
        Binder::check_qualifier(self.qualifier.as_ref())
    }

    fn complete(&mut self, checked: Result<BindingSpec>) -> Result<()> {
        match checked {
            Ok(spec) => {
                let key = self.key();
                self.binder.commit(key, spec);
                Ok(())
            }
            Err(err) => Err(self.binder.record(err)),
        }
    }

    fn key(&self) -> BindingKey {
        let qualifier = self.qualifier.clone().unwrap_or_else(Qualifier::unspecified);
        BindingKey::new(self.interface.as_str(), qualifier)
    }
}

impl Drop for BindingBuilder<'_> {
    fn drop(&mut self) {
        if !self.committed {
            let key = self.key();
            tracing::warn!(
                module = %self.binder.module,
                interface = %key.interface,
                "binding dropped without a target"
            );
            self.binder.incomplete.push(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use bindery_common::config::BinderyConfig;
    use bindery_aop::InterceptorRegistry;

    use super::*;
    use crate::catalog::ClassManifest;

    fn binder(config: BinderyConfig) -> Binder {
        let manifest = ClassManifest::new()
            .with_class("App\\UserDb")
            .with_provider("App\\DbProvider");
        let context = ModuleContext::from_manifest(
            config,
            manifest,
            InterceptorRegistry::new().register_named("App\\TaxCharger"),
        );
        Binder::new("Test".into(), context.shared(), BindingRegistry::new(), Vec::new())
    }

    #[test]
    fn rebinding_overwrites() {
        let mut binder = binder(BinderyConfig::default());
        binder.bind("App\\DbInterface").to("App\\UserDb").expect("bind");
        binder.bind("App\\DbInterface").to("App\\OtherDb").expect("rebind");
        let (registry, _) = binder.finish().expect("complete");
        assert_eq!(
            registry.resolve("App\\DbInterface", None),
            Some(&BindingSpec::ToClass(ClassId::new("App\\OtherDb")))
        );
        assert_eq!(registry.binding_count(), 1);
    }

    #[test]
    fn dropped_builder_fails_finish() {
        let mut binder = binder(BinderyConfig::default());
        let _ = binder.bind("App\\DbInterface").annotated_with("primary");
        let err = binder.finish().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("primary"));
    }

    #[test]
    fn failed_terminal_fails_finish() {
        let mut binder = binder(BinderyConfig::default());
        let err = binder.bind("App\\DbInterface").to("not a class").unwrap_err();
        assert!(err.is_to_binding());
        let err = binder.finish().unwrap_err();
        assert!(err.is_to_binding());
        assert!(err.to_string().contains("not a class"));
    }

    #[test]
    fn ignored_failure_still_fails_finish() {
        let mut binder = binder(BinderyConfig::default());
        let _ = binder.bind("App\\DbInterface").to("not a class");
        binder.bind("App\\LogInterface").to("App\\FileLog").expect("bind");
        let _ = binder.bind("App\\DbInterface").to_provider("App\\UserDb");
        let err = binder.finish().unwrap_err();
        assert!(err.is_to_binding(), "first failure wins, got: {err}");
    }

    #[test]
    fn reserved_qualifier_is_rejected() {
        let mut binder = binder(BinderyConfig::default());
        let err = binder
            .bind("App\\DbInterface")
            .annotated_with("*")
            .to("App\\UserDb")
            .unwrap_err();
        assert!(err.is_to_binding());
        assert!(err.to_string().contains("reserved qualifier"));
        let err = binder.finish().unwrap_err();
        assert!(err.is_to_binding());
    }

    #[test]
    fn reserved_qualifier_never_reaches_the_registry() {
        let mut binder = binder(BinderyConfig::default());
        let _ = binder.bind("").annotated_with("*").to_instance("koriym");
        assert!(binder.registry.is_empty());
    }

    #[test]
    fn malformed_interface_is_rejected() {
        let mut binder = binder(BinderyConfig::default());
        let err = binder.bind("App\\\\Db").to("App\\UserDb").unwrap_err();
        assert!(err.is_to_binding());
    }

    #[test]
    fn lenient_config_skips_syntax_checks() {
        let mut binder = binder(BinderyConfig {
            strict_identifiers: false,
            ..BinderyConfig::default()
        });
        binder.bind("weird id").to("not a class").expect("lenient");
        let (registry, _) = binder.finish().expect("complete");
        assert!(registry.contains("weird id"));
    }

    #[test]
    fn known_classes_required_when_configured() {
        let mut binder = binder(BinderyConfig {
            require_known_classes: true,
            ..BinderyConfig::default()
        });
        binder.bind("App\\DbInterface").to("\\App\\UserDb").expect("known");
        let err = binder
            .bind("App\\LogInterface")
            .to("App\\FileLog")
            .unwrap_err();
        assert!(err.is_to_binding());
        assert!(err.to_string().contains("cannot be resolved"));
    }

    #[test]
    fn provider_capability_is_checked() {
        let mut binder = binder(BinderyConfig::default());
        binder
            .bind("App\\DbInterface")
            .to_provider("App\\DbProvider")
            .expect("provider");
        let err = binder
            .bind("App\\DbInterface")
            .to_provider("App\\UserDb")
            .unwrap_err();
        assert!(err.is_configuration());
        let err = binder
            .bind("App\\DbInterface")
            .to_provider("bad provider")
            .unwrap_err();
        assert!(err.is_to_binding());
    }

    #[test]
    fn object_instance_class_is_checked() {
        let mut binder = binder(BinderyConfig::default());
        let err = binder
            .bind("App\\UserInterface")
            .to_instance(crate::registry::ObjectInstance::of("no such class"))
            .unwrap_err();
        assert!(err.is_to_binding());
    }

    #[test]
    fn unknown_interceptor_fails() {
        let mut binder = binder(BinderyConfig::default());
        binder
            .bind_interceptor(Matcher::any(), Matcher::any(), &["App\\TaxCharger"])
            .expect("registered");
        let err = binder
            .bind_interceptor(Matcher::any(), Matcher::any(), &["App\\Missing"])
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(binder.pointcuts.len(), 1);
        let err = binder.finish().unwrap_err();
        assert!(err.to_string().contains("App\\Missing"));
    }
}
