//! Unbundle command implementation
//!
//! Splits documents returned by the runtime back into module files. A
//! malformed payload never aborts the batch: it is kept unsplit under the
//! output directory, reported, and processing continues.

use std::path::{Path, PathBuf};

use crate::cli::UnbundleArgs;
use crate::commands::helpers;
use crate::error::{Result, SpoolError};
use crate::unbundler::{self, LEADING_KEY, TRAILING_KEY, UNSPLIT_KEY};
use crate::workspace::Workspace;

/// Run unbundle command
pub fn run(workspace: Option<PathBuf>, args: UnbundleArgs) -> Result<()> {
    let ws = Workspace::discover(workspace)?;
    let out_dir = match &args.out {
        Some(dir) => helpers::absolutize(dir)?,
        None => ws.root.join(&ws.config.output_dir),
    };

    let mut failed = 0;
    for file in &args.files {
        match unbundle_one(&ws, file, &args, &out_dir) {
            Ok(()) => {}
            Err(e) => {
                helpers::failure(&format!("{}: {}", file.display(), e));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(SpoolError::BundleBatchFailed {
            failed,
            total: args.files.len(),
        });
    }
    Ok(())
}

fn unbundle_one(
    ws: &Workspace,
    file: &Path,
    args: &UnbundleArgs,
    out_dir: &Path,
) -> Result<()> {
    let path = helpers::absolutize(file)?;
    let content = std::fs::read_to_string(&path).map_err(|e| SpoolError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let grammar = helpers::grammar_for_path(&ws.config, &path)?;

    let outcome = unbundler::unbundle(&content, &grammar);

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "payload".to_string());

    if let Some(condition) = &outcome.degraded {
        // Recoverable: keep the payload unsplit and move on
        helpers::warn(&format!("{}: {}", file.display(), condition));
        if let Some(unsplit) = outcome.modules.get(UNSPLIT_KEY) {
            let target = out_dir.join("unsplit").join(&file_name);
            helpers::write_atomic(&target, unsplit)?;
            helpers::success(&format!(
                "{} kept unsplit at {}",
                file.display(),
                target.display()
            ));
        }
        return Ok(());
    }

    let mut written = 0;
    let mut unchanged = 0;
    for (rel, module_content) in &outcome.modules {
        if rel == LEADING_KEY || rel == TRAILING_KEY {
            let suffix = if rel == LEADING_KEY { "leading" } else { "trailing" };
            let target = out_dir.join(format!("{}.{}", file_name, suffix));
            helpers::write_atomic(&target, module_content)?;
            helpers::warn(&format!(
                "{}: {} content saved to {}",
                file.display(),
                suffix,
                target.display()
            ));
            continue;
        }

        let Some(target) = helpers::safe_join(&ws.root, rel) else {
            helpers::warn(&format!(
                "{}: skipping module with unsafe path '{}'",
                file.display(),
                rel
            ));
            continue;
        };

        if target.is_file() {
            let existing = std::fs::read_to_string(&target).unwrap_or_default();
            if existing == *module_content {
                unchanged += 1;
                continue;
            }
            if !args.yes && !confirm_overwrite(rel) {
                continue;
            }
        }

        helpers::write_atomic(&target, module_content)?;
        written += 1;
    }

    helpers::success(&format!(
        "{}: {} modules written, {} unchanged",
        file.display(),
        written,
        unchanged
    ));
    Ok(())
}

fn confirm_overwrite(rel: &str) -> bool {
    inquire::Confirm::new(&format!("Overwrite {}?", rel))
        .with_default(true)
        .prompt()
        .unwrap_or(false)
}
