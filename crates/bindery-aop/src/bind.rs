//! Per-class accumulator of applicable pointcuts.

use std::sync::Arc;

use bindery_common::types::ClassId;

use crate::interceptor::Interceptor;
use crate::matcher::{Candidate, Matcher};
use crate::reader::AttributeReader;

/// The method-level view of every pointcut whose class matcher accepted one
/// target class.
///
/// Entries are consulted in registration order; the first method matcher
/// that accepts a method decides its interceptor list.
#[derive(Debug, Clone)]
pub struct Bind {
    class: ClassId,
    reader: Arc<dyn AttributeReader>,
    entries: Vec<(Matcher, Vec<Interceptor>)>,
}

impl Bind {
    /// Creates an empty accumulator for `class`.
    pub fn new(class: impl Into<ClassId>, reader: Arc<dyn AttributeReader>) -> Self {
        Self {
            class: class.into(),
            reader,
            entries: Vec::new(),
        }
    }

    /// Target class this bind was built for.
    #[must_use]
    pub const fn class(&self) -> &ClassId {
        &self.class
    }

    /// Registers a method matcher with its interceptors.
    pub fn bind(&mut self, method_matcher: Matcher, interceptors: Vec<Interceptor>) {
        tracing::trace!(
            class = %self.class,
            interceptors = interceptors.len(),
            "registering method matcher"
        );
        self.entries.push((method_matcher, interceptors));
    }

    /// Returns `true` once at least one method matcher was registered.
    #[must_use]
    pub fn has_binding(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of registered method matchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interceptors for `method`, or `None` when no method matcher accepts it.
    #[must_use]
    pub fn interceptors(&self, method: &str) -> Option<&[Interceptor]> {
        let annotations = self.reader.method_annotations(&self.class, method);
        let candidate = Candidate::named(method).with_annotations(&annotations);
        self.entries
            .iter()
            .find(|(matcher, _)| matcher.matches(&candidate))
            .map(|(_, interceptors)| interceptors.as_slice())
    }
}
