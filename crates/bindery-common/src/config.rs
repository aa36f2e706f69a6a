//! Engine configuration model.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BinderyError, Result};

/// Root configuration for module construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderyConfig {
    /// Validate identifier syntax in terminal binder calls.
    pub strict_identifiers: bool,
    /// Require `to(...)` targets to be known to the class catalog.
    pub require_known_classes: bool,
}

impl Default for BinderyConfig {
    fn default() -> Self {
        Self {
            strict_identifiers: true,
            require_known_classes: false,
        }
    }
}

impl BinderyConfig {
    /// Loads a configuration from a JSON file; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| BinderyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
