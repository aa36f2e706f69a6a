//! `install` resolution against the file system.
//!
//! Install sources are paths relative to the directory of the installing
//! file; the `.bind` extension may be omitted. Resolved paths are canonical
//! so that one file reached through two different relative paths is built
//! once.

use std::path::{Path, PathBuf};

use bindery_common::constants::DEFINITION_EXTENSION;
use bindery_common::error::{BinderyError, Result};

use crate::parser::ast::DefinitionFile;
use crate::parser::parse_definition;

/// Resolves an install source relative to `base_dir`.
///
/// # Errors
///
/// Returns [`BinderyError::NotFound`] if no file exists at the resolved path.
pub fn resolve_install(source: &str, base_dir: &Path) -> Result<PathBuf> {
    let mut candidate = base_dir.join(source);
    if !candidate.is_file() && !source.ends_with(DEFINITION_EXTENSION) {
        candidate = base_dir.join(format!("{source}{DEFINITION_EXTENSION}"));
    }
    if !candidate.is_file() {
        return Err(BinderyError::NotFound {
            kind: "definition file",
            id: candidate.display().to_string(),
        });
    }
    let resolved = canonical(&candidate)?;
    tracing::debug!(source, path = %resolved.display(), "resolved install");
    Ok(resolved)
}

/// Reads and parses the definition file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_definition(path: &Path) -> Result<DefinitionFile> {
    let content = std::fs::read_to_string(path).map_err(|source| BinderyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_definition(&content).map_err(|err| match err {
        BinderyError::Parse { message } => BinderyError::Parse {
            message: format!("{}: {message}", path.display()),
        },
        other => other,
    })
}

pub(crate) fn canonical(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|source| BinderyError::Io {
        path: path.to_path_buf(),
        source,
    })
}
