//! Shared helpers for command implementations

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use console::style;

use crate::config::ProjectConfig;
use crate::error::{Result, SpoolError};
use crate::grammar::{Grammar, GrammarKind};

/// Pick the grammar for a file from its extension, per the project config
pub fn grammar_for_path(config: &ProjectConfig, path: &Path) -> Result<Grammar> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext == config.script.extension {
        Ok(Grammar::with_extension(
            GrammarKind::Script,
            config.script.extension.as_str(),
        ))
    } else if ext == config.markup.extension {
        Ok(Grammar::with_extension(
            GrammarKind::Markup,
            config.markup.extension.as_str(),
        ))
    } else {
        Err(SpoolError::ConfigInvalid {
            message: format!(
                "no grammar configured for '{}' files: {}",
                ext,
                path.display()
            ),
        })
    }
}

/// Resolve a command-line path against the current directory
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(crate::source::canonical(path))
    } else {
        let cwd = std::env::current_dir()?;
        Ok(crate::source::canonical(&cwd.join(path)))
    }
}

/// Join a marker-recorded relative path under the workspace root.
///
/// Marker paths come from documents the runtime returned; absolute paths and
/// parent traversal must never escape the workspace.
pub fn safe_join(root: &Path, rel: &str) -> Option<PathBuf> {
    let rel_path = Path::new(rel);
    if rel_path.is_absolute() || rel.is_empty() {
        return None;
    }
    if !rel_path
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(rel_path))
}

/// Write a file atomically: temp file in the target directory, then rename
pub fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let parent = target.parent().ok_or_else(|| SpoolError::FileWriteFailed {
        path: target.display().to_string(),
        reason: "no parent directory".to_string(),
    })?;
    std::fs::create_dir_all(parent).map_err(|e| SpoolError::FileWriteFailed {
        path: target.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut temp =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| SpoolError::FileWriteFailed {
            path: target.display().to_string(),
            reason: e.to_string(),
        })?;
    temp.write_all(content.as_bytes())
        .map_err(|e| SpoolError::FileWriteFailed {
            path: target.display().to_string(),
            reason: e.to_string(),
        })?;
    temp.persist(target).map_err(|e| SpoolError::FileWriteFailed {
        path: target.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

pub fn warn(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

pub fn failure(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}
