//! # bindery-aop
//!
//! Aspect matching layer of the Bindery engine.
//!
//! Handles:
//! - **Matcher**: Tagged-variant predicates over class and method candidates.
//! - **Reader**: The attribute reader seam supplying annotations and ancestry.
//! - **Interceptor**: Opaque interceptor objects and the type registry used to
//!   re-resolve them after a snapshot restore.
//! - **Pointcut**: `(class matcher, method matcher, interceptors)` triples.
//! - **Bind**: The per-class accumulator queried by method name.

pub mod bind;
pub mod interceptor;
pub mod matcher;
pub mod pointcut;
pub mod reader;

pub use bind::Bind;
pub use interceptor::{Interceptor, InterceptorRegistry, MethodInterceptor, NamedInterceptor};
pub use matcher::{Candidate, Matcher};
pub use pointcut::{Pointcut, PointcutSnapshot};
pub use reader::{AttributeReader, NoAttributes};
