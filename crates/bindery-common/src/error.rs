//! Unified error types for the Bindery workspace.
//!
//! Three variants form the integrator-facing taxonomy (`ReadOnly`,
//! `ToBinding`, `Configuration`). They are raised synchronously at the
//! point of violation and never retried. The remaining variants cover the
//! definition language and file access.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BinderyError {
    /// A constructed module's registry was asked to insert or remove a key.
    #[error("binding registry is read-only: cannot modify \"{interface}\"")]
    ReadOnly {
        /// Interface identifier the caller tried to write.
        interface: String,
    },

    /// A terminal binder call received a malformed or unresolvable identifier.
    #[error("invalid binding target \"{identifier}\": {reason}")]
    ToBinding {
        /// Offending identifier, verbatim.
        identifier: String,
        /// Why the identifier was rejected.
        reason: String,
    },

    /// Module configuration is inconsistent (provider contract, incomplete
    /// binding, unknown interceptor type, unsupported snapshot).
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration failure.
        message: String,
    },

    /// A module definition file could not be parsed or failed validation.
    #[error("parse error: {message}")]
    Parse {
        /// Description of the syntax or semantic error.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl BinderyError {
    /// Shorthand for a [`BinderyError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Shorthand for a [`BinderyError::ToBinding`].
    pub fn to_binding(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ToBinding {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`BinderyError::ReadOnly`].
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly { .. })
    }

    /// Returns `true` for [`BinderyError::ToBinding`].
    pub const fn is_to_binding(&self) -> bool {
        matches!(self, Self::ToBinding { .. })
    }

    /// Returns `true` for [`BinderyError::Configuration`].
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BinderyError>;
