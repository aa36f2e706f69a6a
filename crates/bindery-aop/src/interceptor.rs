//! Interceptors and the interceptor type registry.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bindery_common::error::{BinderyError, Result};
use bindery_common::types::ClassId;

/// An object invoked around a matched method call.
///
/// The aspect layer never calls into interceptors; it only keeps them in
/// order. `as_any` lets the proxy builder recover the concrete type.
pub trait MethodInterceptor: Any + fmt::Debug + Send + Sync {
    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// An interceptor instance together with its type identifier.
#[derive(Debug, Clone)]
pub struct Interceptor {
    class: ClassId,
    instance: Arc<dyn MethodInterceptor>,
}

impl Interceptor {
    /// Wraps an interceptor instance under its type identifier.
    pub fn new(class: impl Into<ClassId>, instance: Arc<dyn MethodInterceptor>) -> Self {
        Self {
            class: class.into(),
            instance,
        }
    }

    /// Type identifier the interceptor was registered under.
    #[must_use]
    pub const fn class(&self) -> &ClassId {
        &self.class
    }

    /// The interceptor object.
    #[must_use]
    pub fn instance(&self) -> &Arc<dyn MethodInterceptor> {
        &self.instance
    }

    /// Returns the concrete interceptor if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: MethodInterceptor>(&self) -> Option<&T> {
        self.instance.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for Interceptor {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
    }
}

/// An interceptor with no behaviour of its own, known only by type identifier.
///
/// Used where interceptors are declared by name (definition files, the CLI)
/// and the proxy builder supplies the implementation later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedInterceptor {
    class: ClassId,
}

impl NamedInterceptor {
    /// Creates a named interceptor.
    pub fn new(class: impl Into<ClassId>) -> Self {
        Self {
            class: class.into(),
        }
    }

    /// The interceptor type identifier.
    #[must_use]
    pub const fn class(&self) -> &ClassId {
        &self.class
    }
}

impl MethodInterceptor for NamedInterceptor {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

type Factory = Arc<dyn Fn() -> Arc<dyn MethodInterceptor> + Send + Sync>;

/// Maps interceptor type identifiers to factories.
///
/// Pointcuts reference interceptors by type identifier so that a restored
/// snapshot can rebuild the same interceptor list.
#[derive(Clone, Default)]
pub struct InterceptorRegistry {
    factories: BTreeMap<String, Factory>,
}

impl InterceptorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory for an interceptor type, replacing any previous one.
    #[must_use]
    pub fn register<F, I>(mut self, class: impl Into<ClassId>, factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: MethodInterceptor,
    {
        let class = class.into();
        let factory: Factory = Arc::new(move || Arc::new(factory()) as Arc<dyn MethodInterceptor>);
        let _ = self.factories.insert(class.normalized().to_owned(), factory);
        self
    }

    /// Registers a [`NamedInterceptor`] for the type identifier.
    #[must_use]
    pub fn register_named(self, class: impl Into<ClassId>) -> Self {
        let class = class.into();
        let named = class.clone();
        self.register(class, move || NamedInterceptor::new(named.clone()))
    }

    /// Returns `true` if a factory exists for the type identifier.
    #[must_use]
    pub fn contains(&self, class: &ClassId) -> bool {
        self.factories.contains_key(class.normalized())
    }

    /// Number of registered interceptor types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Builds a fresh interceptor for the type identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BinderyError::Configuration`] if the type was never registered.
    pub fn resolve(&self, class: &ClassId) -> Result<Interceptor> {
        let factory = self.factories.get(class.normalized()).ok_or_else(|| {
            BinderyError::configuration(format!("interceptor type \"{class}\" is not registered"))
        })?;
        Ok(Interceptor::new(class.clone(), factory()))
    }
}

impl fmt::Debug for InterceptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorRegistry")
            .field("types", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
