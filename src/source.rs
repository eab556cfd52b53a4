//! Content access seam between the engine and the file system
//!
//! The resolver, grapher and bundler never touch the file system directly;
//! they go through a [`ContentSource`] supplied by the caller. Reads happen
//! strictly after resolution. Tests substitute an in-memory source.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::error::{Result, SpoolError};
use crate::hash;

/// Caller-supplied access to module content
pub trait ContentSource {
    /// Whether a regular file exists at the path
    fn exists(&self, path: &Path) -> bool;

    /// Point-in-time read of the file's content
    fn read(&self, path: &Path) -> Result<String>;

    /// Change signature for resolution-cache invalidation.
    ///
    /// Modification time when the backend has one, content hash otherwise,
    /// `None` when the file is gone.
    fn signature(&self, path: &Path) -> Option<String>;
}

/// File-system backed content source used by the CLI
#[derive(Debug, Default)]
pub struct FsSource;

impl FsSource {
    pub fn new() -> Self {
        Self
    }
}

impl ContentSource for FsSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| SpoolError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn signature(&self, path: &Path) -> Option<String> {
        let meta = std::fs::metadata(path).ok()?;
        match meta.modified() {
            Ok(mtime) => {
                let stamp = mtime.duration_since(UNIX_EPOCH).ok()?;
                Some(format!("mtime:{}.{}", stamp.as_secs(), stamp.subsec_nanos()))
            }
            // Platforms without mtime fall back to hashing the content
            Err(_) => hash::hash_file(path).ok(),
        }
    }
}

/// Normalize an absolute path without resolving through UNC weirdness on
/// Windows; leaves the path untouched when it cannot be canonicalized.
pub fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_source_read_and_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("m.script");
        std::fs::write(&path, "content\n").unwrap();

        let source = FsSource::new();
        assert!(source.exists(&path));
        assert!(!source.exists(&temp.path().join("missing.script")));
        assert_eq!(source.read(&path).unwrap(), "content\n");
    }

    #[test]
    fn test_fs_source_read_missing() {
        let temp = TempDir::new().unwrap();
        let source = FsSource::new();
        let result = source.read(&temp.path().join("missing.script"));
        assert!(matches!(result, Err(SpoolError::FileReadFailed { .. })));
    }

    #[test]
    fn test_fs_source_signature_tracks_changes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("m.script");
        std::fs::write(&path, "one").unwrap();

        let source = FsSource::new();
        let first = source.signature(&path).unwrap();
        assert!(source.signature(&temp.path().join("missing")).is_none());

        // A rewrite must eventually change the signature; set mtime forward
        // explicitly to avoid coarse-clock flakiness.
        let later = std::time::SystemTime::now() + std::time::Duration::from_secs(2);
        std::fs::write(&path, "two").unwrap();
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(later).unwrap();
        drop(file);

        let second = source.signature(&path).unwrap();
        assert_ne!(first, second);
    }
}
