//! # bindery-common
//!
//! Shared identifier types, error definitions, engine configuration and
//! constants used across the entire Bindery workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the primitives that the aspect layer, the
//! binding core and the definition language build upon.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
