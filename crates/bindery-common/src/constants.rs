//! Workspace-wide constants.

/// Qualifier used when a binding is made without `annotatedWith`.
pub const NAME_UNSPECIFIED: &str = "*";

/// Separator between namespace segments of a class identifier.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// File extension for module definition files.
pub const DEFINITION_EXTENSION: &str = ".bind";

/// Definition file looked up when the CLI is given no path.
pub const DEFAULT_DEFINITION_FILE: &str = "module.bind";

/// Format version written into structural module snapshots.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Binary name for the CLI.
pub const BIN_NAME: &str = "bindery";
