//! Static analysis and validation of the parsed AST.
//!
//! Checks for malformed qualifiers, empty interceptor lists and install
//! mistakes before any module is built.

use std::collections::HashSet;

use bindery_common::constants::NAME_UNSPECIFIED;
use bindery_common::error::{BinderyError, Result};

use super::ast::DefinitionFile;

/// Validates a parsed definition file for semantic correctness.
///
/// # Checks performed
///
/// 1. `annotatedWith` never receives an empty or reserved qualifier.
/// 2. Every `bindInterceptor` names at least one interceptor.
/// 3. Install sources are non-empty and not repeated.
///
/// # Errors
///
/// Returns a parse error if any semantic check fails.
pub fn validate(file: &DefinitionFile) -> Result<()> {
    tracing::trace!("validating definition file");
    check_qualifiers(file)?;
    check_interceptor_lists(file)?;
    check_installs(file)?;
    Ok(())
}

fn check_qualifiers(file: &DefinitionFile) -> Result<()> {
    for bind in file.bindings() {
        match bind.qualifier.as_deref() {
            Some("") => {
                return Err(BinderyError::Parse {
                    message: format!("empty qualifier on binding of '{}'", bind.interface),
                });
            }
            Some(NAME_UNSPECIFIED) => {
                return Err(BinderyError::Parse {
                    message: format!(
                        "qualifier '{NAME_UNSPECIFIED}' is reserved (binding of '{}')",
                        bind.interface
                    ),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_interceptor_lists(file: &DefinitionFile) -> Result<()> {
    if file.intercepts().any(|i| i.interceptors.is_empty()) {
        return Err(BinderyError::Parse {
            message: "bindInterceptor requires at least one interceptor".into(),
        });
    }
    Ok(())
}

fn check_installs(file: &DefinitionFile) -> Result<()> {
    let mut seen = HashSet::new();
    for install in file.installs() {
        if install.source.trim().is_empty() {
            return Err(BinderyError::Parse {
                message: "install source is empty".into(),
            });
        }
        if !seen.insert(install.source.as_str()) {
            return Err(BinderyError::Parse {
                message: format!("duplicate install: '{}'", install.source),
            });
        }
    }
    Ok(())
}
