//! In-memory content source and fixtures shared by unit tests

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpoolError};
use crate::hash;
use crate::source::ContentSource;

/// Map-backed content source; signatures are content hashes
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, content)| (PathBuf::from(path), (*content).to_string()))
                .collect(),
        }
    }

    pub fn write(&mut self, path: &str, content: &str) {
        self.files.insert(PathBuf::from(path), content.to_string());
    }
}

impl ContentSource for MemorySource {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SpoolError::FileReadFailed {
                path: path.display().to_string(),
                reason: "no such file".to_string(),
            })
    }

    fn signature(&self, path: &Path) -> Option<String> {
        self.files.get(path).map(|content| hash::hash_content(content))
    }
}
