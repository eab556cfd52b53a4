//! Workspace discovery and root-module enumeration
//!
//! A workspace is the directory holding `spool.yaml`. Discovery ascends from
//! the starting directory to the nearest config file; an explicitly given
//! workspace path is used as-is, with defaults when it has no config.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::Pattern;

use crate::config::{GrammarSettings, ProjectConfig, UserConfig};
use crate::error::{Result, SpoolError};
use crate::source::canonical;

/// Project configuration file name at the workspace root
pub const CONFIG_FILE: &str = "spool.yaml";

pub struct Workspace {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Workspace {
    /// Discover the workspace from an explicit path or the current directory
    pub fn discover(start: Option<PathBuf>) -> Result<Self> {
        match start {
            Some(path) => {
                if !path.is_dir() {
                    return Err(SpoolError::WorkspaceNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::open(&canonical(&path))
            }
            None => {
                let cwd = std::env::current_dir()?;
                let root = ascend_to_config(&cwd).unwrap_or_else(|| cwd.clone());
                Self::open(&canonical(&root))
            }
        }
    }

    /// Open a workspace rooted at `root`, with config defaults when no
    /// spool.yaml is present
    pub fn open(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        let config = if config_path.is_file() {
            ProjectConfig::from_file(&config_path)?
        } else {
            ProjectConfig::default()
        };
        Ok(Workspace {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Ordered search roots for include resolution: project paths first,
    /// then user paths, then the workspace root itself.
    pub fn search_paths(&self, user: Option<&UserConfig>) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .config
            .include_paths
            .iter()
            .map(|p| self.absolute(p))
            .collect();
        if let Some(user) = user {
            paths.extend(user.include_paths.iter().map(|p| self.absolute(p)));
        }
        paths.push(self.root.clone());
        paths
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Bundle roots for one grammar: workspace files matching any of the
    /// grammar's root patterns, sorted for deterministic batch order.
    pub fn root_modules(&self, settings: &GrammarSettings) -> Result<Vec<PathBuf>> {
        let mut globs = Vec::with_capacity(settings.roots.len());
        for pattern in &settings.roots {
            let glob = wax::Glob::new(pattern).map_err(|e| SpoolError::PatternInvalid {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            globs.push(glob);
        }

        let output_dir = self.absolute(&self.config.output_dir);
        let mut matched = Vec::new();
        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| {
                // Depth 0 is the workspace root itself
                e.depth() == 0
                    || (e.path() != output_dir
                        && !e
                            .file_name()
                            .to_str()
                            .is_some_and(|name| name.starts_with('.')))
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let rel_str = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            if globs.iter().any(|g| g.is_match(rel_str.as_str())) {
                matched.push(entry.path().to_path_buf());
            }
        }

        matched.sort();
        Ok(matched)
    }
}

/// Nearest ancestor directory containing spool.yaml
fn ascend_to_config(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        if current.join(CONFIG_FILE).is_file() {
            return Some(current.to_path_buf());
        }
        dir = current.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace_with(config: &str) -> (TempDir, Workspace) {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), config).unwrap();
        let ws = Workspace::open(temp.path()).unwrap();
        (temp, ws)
    }

    #[test]
    fn test_open_without_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::open(temp.path()).unwrap();
        assert_eq!(ws.config, ProjectConfig::default());
    }

    #[test]
    fn test_search_paths_order() {
        let (temp, ws) = workspace_with("include_paths:\n  - modules\n  - vendor\n");
        let user = UserConfig {
            include_paths: vec![PathBuf::from("shared")],
        };

        let paths = ws.search_paths(Some(&user));
        assert_eq!(paths.len(), 4);
        assert_eq!(paths[0], temp.path().join("modules"));
        assert_eq!(paths[1], temp.path().join("vendor"));
        assert_eq!(paths[2], temp.path().join("shared"));
        assert_eq!(paths[3], temp.path().to_path_buf());
    }

    #[test]
    fn test_root_modules_matches_patterns() {
        let (_temp, ws) = workspace_with(
            "script:\n  extension: script\n  roots:\n    - \"src/*.script\"\n",
        );
        std::fs::create_dir_all(ws.root.join("src/lib")).unwrap();
        std::fs::write(ws.root.join("src/main.script"), "x\n").unwrap();
        std::fs::write(ws.root.join("src/other.script"), "y\n").unwrap();
        std::fs::write(ws.root.join("src/lib/dep.script"), "z\n").unwrap();
        std::fs::write(ws.root.join("src/readme.txt"), "t\n").unwrap();

        let roots = ws.root_modules(&ws.config.script).unwrap();
        let names: Vec<_> = roots
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["main.script", "other.script"]);
    }

    #[test]
    fn test_root_modules_skips_output_dir() {
        let (_temp, ws) = workspace_with(
            "output_dir: out\nscript:\n  extension: script\n  roots:\n    - \"**/*.script\"\n",
        );
        std::fs::create_dir_all(ws.root.join("out")).unwrap();
        std::fs::create_dir_all(ws.root.join("src")).unwrap();
        std::fs::write(ws.root.join("src/main.script"), "x\n").unwrap();
        std::fs::write(ws.root.join("out/main.script"), "bundled\n").unwrap();

        let roots = ws.root_modules(&ws.config.script).unwrap();
        assert_eq!(roots.len(), 1);
        assert!(roots[0].ends_with("src/main.script"));
    }

    #[test]
    fn test_root_modules_invalid_pattern() {
        let (_temp, ws) = workspace_with(
            "script:\n  extension: script\n  roots:\n    - \"src/[\"\n",
        );
        let result = ws.root_modules(&ws.config.script);
        assert!(matches!(result, Err(SpoolError::PatternInvalid { .. })));
    }

    #[test]
    fn test_ascend_to_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "").unwrap();
        let nested = temp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let found = ascend_to_config(&nested).unwrap();
        assert_eq!(found, temp.path().to_path_buf());
    }

    #[test]
    fn test_discover_missing_explicit_workspace() {
        let temp = TempDir::new().unwrap();
        let result = Workspace::discover(Some(temp.path().join("missing")));
        assert!(matches!(result, Err(SpoolError::WorkspaceNotFound { .. })));
    }
}
