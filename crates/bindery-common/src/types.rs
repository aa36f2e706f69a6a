//! Identifier primitives shared by the binding and aspect layers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{NAME_UNSPECIFIED, NAMESPACE_SEPARATOR};

/// Abstract service identifier (the left-hand side of a binding).
///
/// May be empty: `bind('')->annotatedWith('user_name')` binds a bare named
/// value that is looked up by qualifier alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceId(String);

impl InterfaceId {
    /// Creates an interface identifier from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InterfaceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Concrete class identifier (binding target, provider, interceptor type).
///
/// Kept verbatim so that rendering reproduces what was bound; catalog
/// lookups go through [`ClassId::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    /// Creates a class identifier from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier exactly as it was given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identifier without its leading namespace separator.
    #[must_use]
    pub fn normalized(&self) -> &str {
        self.0.strip_prefix(NAMESPACE_SEPARATOR).unwrap_or(&self.0)
    }

    /// Returns `true` if the identifier is syntactically a class name.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        is_valid_class_name(&self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Name disambiguating several bindings of one interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qualifier(String);

impl Qualifier {
    /// Creates a qualifier from a string value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The reserved qualifier of bindings made without `annotatedWith`.
    #[must_use]
    pub fn unspecified() -> Self {
        Self(NAME_UNSPECIFIED.to_owned())
    }

    /// Returns `true` for the reserved unspecified qualifier.
    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        self.0 == NAME_UNSPECIFIED
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Qualifier {
    fn default() -> Self {
        Self::unspecified()
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Qualifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Checks the syntax of a class identifier.
///
/// An optional leading `\` followed by one or more `\`-separated segments,
/// each starting with an ASCII letter or `_` and continuing with ASCII
/// alphanumerics or `_`.
#[must_use]
pub fn is_valid_class_name(name: &str) -> bool {
    let body = name.strip_prefix(NAMESPACE_SEPARATOR).unwrap_or(name);
    !body.is_empty() && body.split(NAMESPACE_SEPARATOR).all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
