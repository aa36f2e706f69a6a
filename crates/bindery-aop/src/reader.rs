//! Attribute reader seam.
//!
//! Reading annotations out of source declarations is not this crate's job.
//! An external reader hands over the tags it found; matchers only compare
//! strings.

use std::fmt;

use bindery_common::types::ClassId;

/// Supplies declaration metadata to the aspect matcher.
pub trait AttributeReader: fmt::Debug + Send + Sync {
    /// Annotation tags declared on the class.
    fn class_annotations(&self, class: &ClassId) -> Vec<String>;

    /// Annotation tags declared on one method of the class.
    fn method_annotations(&self, class: &ClassId, method: &str) -> Vec<String>;

    /// Ancestor classes and implemented interfaces of the class.
    fn ancestors(&self, _class: &ClassId) -> Vec<String> {
        Vec::new()
    }
}

/// A reader that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl AttributeReader for NoAttributes {
    fn class_annotations(&self, _class: &ClassId) -> Vec<String> {
        Vec::new()
    }

    fn method_annotations(&self, _class: &ClassId, _method: &str) -> Vec<String> {
        Vec::new()
    }
}
