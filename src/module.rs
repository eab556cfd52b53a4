//! Module and include-directive data model
//!
//! A module is one logical source unit participating in an include graph.
//! Modules are constructed fresh per bundle/unbundle call from point-in-time
//! reads; none persist beyond a single operation.

use std::path::PathBuf;

/// A reference from one module to another, by name, at a specific line.
///
/// Unresolved until matched against the search roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// The full original directive line, reproduced verbatim on unbundle
    pub raw: String,

    /// The referenced module name as written in the directive
    pub name: String,

    /// 1-based source line the directive appeared on
    pub line: usize,
}

/// One logical source unit participating in an include graph
#[derive(Debug, Clone)]
pub struct Module {
    /// Stable identifier, derived from the workspace-relative path
    pub id: String,

    /// Resolved absolute path
    pub path: PathBuf,

    /// Workspace-relative path with forward slashes
    pub rel_path: String,

    /// Raw text content at the time of the read
    pub content: String,

    /// Include directives found in the content, in source order
    pub includes: Vec<IncludeDirective>,
}

impl Module {
    /// Derive a module identifier from a workspace-relative path.
    ///
    /// `lib/util.script` becomes `lib.util` when `ext` matches the file
    /// extension. Callers handle collisions (see the bundler's id table).
    pub fn derive_id(rel_path: &str, ext: &str) -> String {
        let suffix = format!(".{}", ext);
        let stem = rel_path.strip_suffix(suffix.as_str()).unwrap_or(rel_path);
        stem.replace('/', ".")
    }

    /// Fallback identifier used when the derived id collides: the full
    /// relative path, separators replaced, extension kept.
    pub fn fallback_id(rel_path: &str) -> String {
        rel_path.replace('/', ".")
    }
}
