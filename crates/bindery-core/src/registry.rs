//! The binding registry.
//!
//! An insertion-ordered map `interface → (qualifier → spec)`. Order drives
//! both rendering and installation, so both levels are kept as vectors and
//! searched linearly; modules hold a handful of interfaces at most.
//!
//! Once sealed the registry rejects [`BindingRegistry::insert`] and
//! [`BindingRegistry::remove`] with [`BinderyError::ReadOnly`]. The only
//! remaining write path is the crate-private one used by the binder while a
//! module is being constructed.

use bindery_common::error::{BinderyError, Result};
use bindery_common::types::{ClassId, InterfaceId, Qualifier};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An object captured by value when it was bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInstance {
    /// Fully qualified class name of the captured object.
    pub class: ClassId,
    /// Serialized state of the object.
    pub state: serde_json::Value,
}

impl ObjectInstance {
    /// Captures `value` as an instance of `class`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn capture<T: Serialize>(class: impl Into<ClassId>, value: &T) -> Result<Self> {
        Ok(Self {
            class: class.into(),
            state: serde_json::to_value(value)?,
        })
    }

    /// An instance of `class` without state.
    pub fn of(class: impl Into<ClassId>) -> Self {
        Self {
            class: class.into(),
            state: serde_json::Value::Null,
        }
    }

    /// Rebuilds a copy of the captured object.
    ///
    /// # Errors
    ///
    /// Returns an error if the state does not deserialize into `T`.
    pub fn restore<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.state.clone())?)
    }
}

/// A value bound with `to_instance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum InstanceValue {
    /// A string scalar.
    String(String),
    /// An integer scalar.
    Integer(i64),
    /// An ordered list of values.
    Array(Vec<InstanceValue>),
    /// A captured object.
    Object(ObjectInstance),
}

impl InstanceValue {
    /// Runtime type tag used by the canonical text form.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Type-specific literal of the canonical text form.
    ///
    /// Arrays render as a bracketed list of double-quoted element literals.
    #[must_use]
    pub fn literal(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Array(items) => {
                let quoted: Vec<String> = items
                    .iter()
                    .map(|item| serde_json::Value::String(item.literal()).to_string())
                    .collect();
                format!("[{}]", quoted.join(","))
            }
            Self::Object(object) => object.class.normalized().to_owned(),
        }
    }
}

impl From<&str> for InstanceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for InstanceValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for InstanceValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for InstanceValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl<T: Into<InstanceValue>> From<Vec<T>> for InstanceValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<ObjectInstance> for InstanceValue {
    fn from(value: ObjectInstance) -> Self {
        Self::Object(value)
    }
}

/// How a binding is resolved by the instantiator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "to", content = "target", rename_all = "snake_case")]
pub enum BindingSpec {
    /// Instantiate the named class.
    ToClass(ClassId),
    /// Instantiate the provider and ask it for the value.
    ToProvider(ClassId),
    /// Hand back the stored value.
    ToInstance(InstanceValue),
}

/// `(interface, qualifier)` pair identifying one binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingKey {
    /// Interface identifier.
    pub interface: InterfaceId,
    /// Qualifier, [`Qualifier::unspecified`] when none was given.
    pub qualifier: Qualifier,
}

impl BindingKey {
    /// Creates a key.
    pub fn new(interface: impl Into<InterfaceId>, qualifier: impl Into<Qualifier>) -> Self {
        Self {
            interface: interface.into(),
            qualifier: qualifier.into(),
        }
    }

    /// Creates a key with the unspecified qualifier.
    pub fn unqualified(interface: impl Into<InterfaceId>) -> Self {
        Self::new(interface, Qualifier::unspecified())
    }
}

/// Ordered qualifier → spec map of one interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifierMap {
    entries: Vec<(Qualifier, BindingSpec)>,
}

impl QualifierMap {
    /// Spec bound under `qualifier`.
    #[must_use]
    pub fn get(&self, qualifier: &str) -> Option<&BindingSpec> {
        self.entries
            .iter()
            .find(|(q, _)| q.as_str() == qualifier)
            .map(|(_, spec)| spec)
    }

    /// Returns `true` if `qualifier` is bound.
    #[must_use]
    pub fn contains(&self, qualifier: &str) -> bool {
        self.get(qualifier).is_some()
    }

    /// Qualifiers and specs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Qualifier, &BindingSpec)> {
        self.entries.iter().map(|(q, spec)| (q, spec))
    }

    /// Number of qualifiers bound.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn put(&mut self, qualifier: Qualifier, spec: BindingSpec) {
        if let Some(slot) = self.entries.iter_mut().find(|(q, _)| *q == qualifier) {
            slot.1 = spec;
        } else {
            self.entries.push((qualifier, spec));
        }
    }
}

/// Ordered `interface → QualifierMap` registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingRegistry {
    entries: Vec<(InterfaceId, QualifierMap)>,
    #[serde(skip)]
    sealed: bool,
}

impl PartialEq for BindingRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl BindingRegistry {
    /// Creates an empty, writable registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-qualifier specs of `interface`.
    #[must_use]
    pub fn get(&self, interface: &str) -> Option<&QualifierMap> {
        self.entries
            .iter()
            .find(|(i, _)| i.as_str() == interface)
            .map(|(_, map)| map)
    }

    /// Returns `true` if `interface` has at least one binding.
    #[must_use]
    pub fn contains(&self, interface: &str) -> bool {
        self.get(interface).is_some()
    }

    /// Spec bound under `key`.
    #[must_use]
    pub fn lookup(&self, key: &BindingKey) -> Option<&BindingSpec> {
        self.resolve(key.interface.as_str(), Some(key.qualifier.as_str()))
    }

    /// Spec bound to `interface` under `qualifier`, or under the unspecified
    /// qualifier when `qualifier` is `None`.
    #[must_use]
    pub fn resolve(&self, interface: &str, qualifier: Option<&str>) -> Option<&BindingSpec> {
        let qualifier = qualifier.unwrap_or(bindery_common::constants::NAME_UNSPECIFIED);
        self.get(interface)?.get(qualifier)
    }

    /// Number of interfaces bound.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of `(interface, qualifier)` bindings.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.entries.iter().map(|(_, map)| map.len()).sum()
    }

    /// Interface identifiers in first-seen order.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceId> {
        self.entries.iter().map(|(i, _)| i)
    }

    /// Interfaces and their qualifier maps in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&InterfaceId, &QualifierMap)> {
        self.entries.iter().map(|(i, map)| (i, map))
    }

    /// Every binding, flattened in registry order.
    pub fn bindings(&self) -> impl Iterator<Item = (&InterfaceId, &Qualifier, &BindingSpec)> {
        self.entries
            .iter()
            .flat_map(|(i, map)| map.iter().map(move |(q, spec)| (i, q, spec)))
    }

    /// Returns `true` once the owning module finished construction.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Adds or replaces a binding.
    ///
    /// # Errors
    ///
    /// Returns [`BinderyError::ReadOnly`] if the registry is sealed; the
    /// registry is left unchanged.
    pub fn insert(&mut self, key: BindingKey, spec: BindingSpec) -> Result<()> {
        if self.sealed {
            return Err(BinderyError::ReadOnly {
                interface: key.interface.to_string(),
            });
        }
        self.put(key, spec);
        Ok(())
    }

    /// Removes every binding of `interface`.
    ///
    /// # Errors
    ///
    /// Returns [`BinderyError::ReadOnly`] if the registry is sealed; the
    /// registry is left unchanged.
    pub fn remove(&mut self, interface: &str) -> Result<Option<QualifierMap>> {
        if self.sealed {
            return Err(BinderyError::ReadOnly {
                interface: interface.to_owned(),
            });
        }
        let position = self.entries.iter().position(|(i, _)| i.as_str() == interface);
        Ok(position.map(|idx| self.entries.remove(idx).1))
    }

    /// Writes a binding; an existing key keeps its position (last write wins).
    pub(crate) fn put(&mut self, key: BindingKey, spec: BindingSpec) {
        match self.entries.iter_mut().find(|(i, _)| *i == key.interface) {
            Some((_, map)) => map.put(key.qualifier, spec),
            None => {
                let mut map = QualifierMap::default();
                map.put(key.qualifier, spec);
                self.entries.push((key.interface, map));
            }
        }
    }

    /// Merges `other` into `self`: existing keys are kept, new ones appended
    /// in `other`'s order. Returns the number of bindings added.
    pub(crate) fn merge_from(&mut self, other: &Self) -> usize {
        let mut added = 0;
        for (interface, qualifier, spec) in other.bindings() {
            let present = self
                .get(interface.as_str())
                .is_some_and(|map| map.contains(qualifier.as_str()));
            if !present {
                self.put(
                    BindingKey::new(interface.clone(), qualifier.clone()),
                    spec.clone(),
                );
                added += 1;
            }
        }
        added
    }

    /// Fails if an interface, or a qualifier under one interface, appears
    /// twice. Only decoded registries can be in that state.
    pub(crate) fn check_unique(&self) -> Result<()> {
        for (index, (interface, map)) in self.entries.iter().enumerate() {
            if self.entries[..index].iter().any(|(seen, _)| seen == interface) {
                return Err(BinderyError::configuration(format!(
                    "interface \"{interface}\" is listed more than once"
                )));
            }
            for (position, (qualifier, _)) in map.entries.iter().enumerate() {
                if map.entries[..position].iter().any(|(seen, _)| seen == qualifier) {
                    return Err(BinderyError::configuration(format!(
                        "qualifier \"{qualifier}\" of \"{interface}\" is listed more than once"
                    )));
                }
            }
        }
        Ok(())
    }

    pub(crate) const fn seal(&mut self) {
        self.sealed = true;
    }
}
