//! # bindery-core
//!
//! Binding configuration engine.
//!
//! Handles:
//! - **Registry**: Ordered `(interface, qualifier) → BindingSpec` storage that
//!   turns read-only once its module is constructed.
//! - **Binder**: The fluent `bind → annotated_with → to*` construction path.
//! - **Module**: Named binding configurations, installation and aspect weaving.
//! - **Catalog**: The class existence and provider capability seam.
//! - **Serializer**: Canonical one-line-per-binding text form.
//! - **Snapshot**: Structural save and restore of constructed modules.

pub mod binder;
pub mod catalog;
pub mod context;
pub mod module;
pub mod registry;
pub mod serializer;
pub mod snapshot;

pub use binder::{Binder, BindingBuilder};
pub use catalog::{ClassCatalog, ClassEntry, ClassManifest};
pub use context::ModuleContext;
pub use module::{Configure, Module};
pub use registry::{
    BindingKey, BindingRegistry, BindingSpec, InstanceValue, ObjectInstance, QualifierMap,
};
pub use snapshot::ModuleSnapshot;
