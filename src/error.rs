//! Error types and handling for spool
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for spool operations
#[derive(Error, Diagnostic, Debug)]
pub enum SpoolError {
    // Resolution errors
    #[error("Module not found: {name} (searched: {searched})")]
    #[diagnostic(
        code(spool::resolve::module_not_found),
        help("Check that the module file exists under one of the configured include paths")
    )]
    ModuleNotFound { name: String, searched: String },

    // Graph errors
    #[error("Cyclic include chain: {}", .chain.join(" -> "))]
    #[diagnostic(
        code(spool::graph::cyclic_include),
        help("Remove one of the includes in the chain to break the cycle")
    )]
    CyclicInclude { chain: Vec<String> },

    // Bundle errors
    #[error("Unresolved include '{name}' at line {line} (searched: {searched})")]
    #[diagnostic(
        code(spool::bundle::unresolved_include),
        help("Check the include directive's module name and the configured include paths")
    )]
    UnresolvedInclude {
        name: String,
        line: usize,
        searched: String,
    },

    #[error("{failed} of {total} bundles failed")]
    #[diagnostic(code(spool::bundle::batch_failed))]
    BundleBatchFailed { failed: usize, total: usize },

    // Unbundle errors
    //
    // Recoverable: callers treat the payload as one unsplit module, report
    // this condition, and continue with the rest of the batch.
    #[error("Malformed bundle: {reason}")]
    #[diagnostic(
        code(spool::unbundle::malformed),
        help("The document was not produced by spool or was mutated after bundling; it is kept as one unsplit module")
    )]
    MalformedBundle { reason: String },

    // Workspace errors
    #[error("Workspace not found at: {path}")]
    #[diagnostic(
        code(spool::workspace::not_found),
        help("Create a spool.yaml at the project root or pass --workspace")
    )]
    WorkspaceNotFound { path: String },

    #[error("Invalid root pattern '{pattern}': {reason}")]
    #[diagnostic(code(spool::workspace::invalid_pattern))]
    PatternInvalid { pattern: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(spool::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(spool::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(spool::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(spool::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(spool::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(spool::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(spool::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for SpoolError {
    fn from(err: std::io::Error) -> Self {
        SpoolError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SpoolError {
    fn from(err: serde_yaml::Error) -> Self {
        SpoolError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SpoolError {
    fn from(err: serde_json::Error) -> Self {
        SpoolError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SpoolError>;
