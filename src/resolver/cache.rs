//! Resolution cache, scoped to one resolver instance
//!
//! Never process-wide: concurrent bundle operations each own their resolver
//! and therefore their cache. Entries are invalidated when the resolved
//! file's change signature (mtime, content hash fallback) no longer matches.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::source::ContentSource;

#[derive(Debug, Clone)]
struct CacheEntry {
    path: PathBuf,
    signature: Option<String>,
}

/// Module-name to resolved-path cache for a single resolver
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Cached resolution for a module name, evicting stale entries
    pub fn lookup(&mut self, name: &str, source: &dyn ContentSource) -> Option<PathBuf> {
        let entry = self.entries.get(name)?;
        let current = source.signature(&entry.path);
        if current.is_some() && current == entry.signature {
            return Some(entry.path.clone());
        }
        self.entries.remove(name);
        None
    }

    pub fn store(&mut self, name: &str, path: &Path, source: &dyn ContentSource) {
        self.entries.insert(
            name.to_string(),
            CacheEntry {
                path: path.to_path_buf(),
                signature: source.signature(path),
            },
        );
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
