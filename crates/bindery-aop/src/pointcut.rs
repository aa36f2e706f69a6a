//! Pointcut definitions and their snapshot form.

use bindery_common::error::Result;
use bindery_common::types::ClassId;
use serde::{Deserialize, Serialize};

use crate::interceptor::{Interceptor, InterceptorRegistry};
use crate::matcher::Matcher;

/// A `(class matcher, method matcher, interceptors)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Pointcut {
    /// Decides which target classes the pointcut applies to.
    pub class_matcher: Matcher,
    /// Decides which methods of a matched class are intercepted.
    pub method_matcher: Matcher,
    /// Interceptors applied, in order.
    pub interceptors: Vec<Interceptor>,
}

impl Pointcut {
    /// Creates a pointcut.
    #[must_use]
    pub const fn new(
        class_matcher: Matcher,
        method_matcher: Matcher,
        interceptors: Vec<Interceptor>,
    ) -> Self {
        Self {
            class_matcher,
            method_matcher,
            interceptors,
        }
    }

    /// Captures the pointcut as data, keeping interceptor type identifiers.
    #[must_use]
    pub fn snapshot(&self) -> PointcutSnapshot {
        PointcutSnapshot {
            class_matcher: self.class_matcher.clone(),
            method_matcher: self.method_matcher.clone(),
            interceptors: self
                .interceptors
                .iter()
                .map(|i| i.class().clone())
                .collect(),
        }
    }
}

/// Serializable form of a [`Pointcut`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointcutSnapshot {
    /// Class-level matcher.
    pub class_matcher: Matcher,
    /// Method-level matcher.
    pub method_matcher: Matcher,
    /// Interceptor type identifiers, in order.
    pub interceptors: Vec<ClassId>,
}

impl PointcutSnapshot {
    /// Rebuilds the pointcut, resolving each interceptor type through `registry`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an interceptor type is not registered.
    pub fn restore(&self, registry: &InterceptorRegistry) -> Result<Pointcut> {
        let interceptors = self
            .interceptors
            .iter()
            .map(|class| registry.resolve(class))
            .collect::<Result<Vec<_>>>()?;
        Ok(Pointcut::new(
            self.class_matcher.clone(),
            self.method_matcher.clone(),
            interceptors,
        ))
    }
}
