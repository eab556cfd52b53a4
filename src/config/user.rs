//! User-level configuration defaults
//!
//! Loaded from `<config dir>/spool/config.yaml` when present. User include
//! paths are appended after the project's so a project always wins.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpoolError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Extra include search roots appended after the project's
    #[serde(default)]
    pub include_paths: Vec<PathBuf>,
}

impl UserConfig {
    /// Load the user config, `None` when the file does not exist
    pub fn load() -> Result<Option<Self>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_from(&dir.join("spool").join("config.yaml"))
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| SpoolError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let config: UserConfig =
            serde_yaml::from_str(&content).map_err(|e| SpoolError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let loaded = UserConfig::load_from(&temp.path().join("config.yaml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_from_reads_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "include_paths:\n  - /opt/shared-modules\n").unwrap();

        let loaded = UserConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(
            loaded.include_paths,
            vec![PathBuf::from("/opt/shared-modules")]
        );
    }

    #[test]
    fn test_load_from_invalid_yaml_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "include_paths: [unclosed\n").unwrap();

        let result = UserConfig::load_from(&path);
        assert!(matches!(result, Err(SpoolError::ConfigParseFailed { .. })));
    }
}
