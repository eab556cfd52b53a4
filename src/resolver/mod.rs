//! Include resolution against an ordered list of search roots
//!
//! Resolution is first-match-wins across the search roots, deterministic,
//! and side-effect-free apart from the instance-scoped cache. A resolver is
//! constructed per bundle operation; nothing it learns outlives the call
//! site that owns it.

pub mod cache;
pub mod graph;

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SpoolError};
use crate::grammar::Grammar;
use crate::source::{ContentSource, canonical};
use cache::ResolutionCache;

/// Resolves module names to absolute paths through the caller's content source
pub struct Resolver<'a> {
    source: &'a dyn ContentSource,

    /// Ordered search roots; earlier roots win
    search_paths: Vec<PathBuf>,

    /// Per-instance resolution cache keyed by module name
    cache: ResolutionCache,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a dyn ContentSource, search_paths: Vec<PathBuf>) -> Self {
        Self {
            source,
            search_paths,
            cache: ResolutionCache::new(),
        }
    }

    pub fn source(&self) -> &'a dyn ContentSource {
        self.source
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Search list formatted for error messages
    pub fn searched_display(&self) -> String {
        self.search_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolve a module name to the first matching file across the search
    /// roots, in list order.
    pub fn resolve(&mut self, name: &str, grammar: &Grammar) -> Result<PathBuf> {
        if !valid_name(name) {
            return Err(self.not_found(name));
        }

        if let Some(path) = self.cache.lookup(name, self.source) {
            return Ok(path);
        }

        for root in &self.search_paths {
            for candidate in grammar.candidates(name) {
                let path = root.join(&candidate);
                if self.source.exists(&path) {
                    let resolved = canonical(&path);
                    self.cache.store(name, &resolved, self.source);
                    return Ok(resolved);
                }
            }
        }

        Err(self.not_found(name))
    }

    fn not_found(&self, name: &str) -> SpoolError {
        SpoolError::ModuleNotFound {
            name: name.to_string(),
            searched: self.searched_display(),
        }
    }
}

/// Module names are workspace-relative: no absolute paths, no parent
/// traversal, no empty names.
fn valid_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let path = Path::new(name);
    if path.is_absolute() {
        return false;
    }
    path.components()
        .all(|c| matches!(c, Component::Normal(_)))
}
