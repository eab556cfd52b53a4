//! Project configuration (spool.yaml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpoolError};

/// Per-grammar settings: the file extension its modules use and the glob
/// patterns selecting which files are bundle roots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrammarSettings {
    pub extension: String,

    #[serde(default)]
    pub roots: Vec<String>,
}

impl GrammarSettings {
    fn script_default() -> Self {
        GrammarSettings {
            extension: "script".to_string(),
            roots: vec!["src/*.script".to_string()],
        }
    }

    fn markup_default() -> Self {
        GrammarSettings {
            extension: "ui".to_string(),
            roots: vec!["src/*.ui".to_string()],
        }
    }
}

/// Project configuration from spool.yaml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Ordered include search roots, relative to the workspace root;
    /// earlier entries win
    #[serde(default = "default_include_paths")]
    pub include_paths: Vec<PathBuf>,

    #[serde(default = "GrammarSettings::script_default")]
    pub script: GrammarSettings,

    #[serde(default = "GrammarSettings::markup_default")]
    pub markup: GrammarSettings,

    /// Where combined documents and recovered segments are written,
    /// relative to the workspace root
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_include_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("src"), PathBuf::from("lib")]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            include_paths: default_include_paths(),
            script: GrammarSettings::script_default(),
            markup: GrammarSettings::markup_default(),
            output_dir: default_output_dir(),
        }
    }
}

impl ProjectConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ProjectConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SpoolError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| SpoolError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_yaml(&content).map_err(|e| match e {
            SpoolError::ConfigParseFailed { reason, .. } => SpoolError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.script.extension.is_empty() || self.markup.extension.is_empty() {
            return Err(SpoolError::ConfigInvalid {
                message: "grammar extensions must not be empty".to_string(),
            });
        }
        if self.script.extension == self.markup.extension {
            return Err(SpoolError::ConfigInvalid {
                message: format!(
                    "script and markup grammars share the extension '{}'",
                    self.script.extension
                ),
            });
        }
        if self.include_paths.is_empty() {
            return Err(SpoolError::ConfigInvalid {
                message: "include_paths must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
