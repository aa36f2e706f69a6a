//! # bindery-compose
//!
//! The `.bind` module definition language.
//!
//! Handles:
//! - **Parser**: Lexing, AST construction, and validation of `.bind` files.
//! - **Graph**: Install graph construction and topological build order.
//! - **Import**: Resolution of `install` sources relative to the installing file.
//! - **Definition**: Replay of parsed statements through the binder.
//! - **Loader**: Whole install trees built into a single module.

pub mod definition;
pub mod graph;
pub mod import;
pub mod loader;
pub mod parser;

pub use definition::DefinitionModule;
pub use loader::{DefinitionTree, load_module, plan};
pub use parser::parse_definition;
