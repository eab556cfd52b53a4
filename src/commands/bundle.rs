//! Bundle command implementation
//!
//! Bundles one root per invocation of the engine; a failing root is reported
//! and the batch continues, failing at the end with a summary.

use std::path::{Path, PathBuf};

use crate::bundler;
use crate::cli::BundleArgs;
use crate::commands::helpers;
use crate::config::UserConfig;
use crate::error::{Result, SpoolError};
use crate::progress::ProgressDisplay;
use crate::resolver::Resolver;
use crate::resolver::graph::relative_display;
use crate::source::FsSource;
use crate::workspace::Workspace;

/// Run bundle command
pub fn run(workspace: Option<PathBuf>, args: BundleArgs) -> Result<()> {
    let ws = Workspace::discover(workspace)?;
    let user = UserConfig::load()?;

    let targets = collect_targets(&ws, &args)?;
    if targets.is_empty() {
        println!("No root modules matched the configured patterns");
        return Ok(());
    }
    if args.stdout && targets.len() != 1 {
        return Err(SpoolError::ConfigInvalid {
            message: format!(
                "--stdout requires exactly one root, got {}",
                targets.len()
            ),
        });
    }

    let out_dir = match &args.out {
        Some(dir) => helpers::absolutize(dir)?,
        None => ws.root.join(&ws.config.output_dir),
    };

    let mut search_paths: Vec<PathBuf> = args
        .include_paths
        .iter()
        .map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                ws.root.join(p)
            }
        })
        .collect();
    search_paths.extend(ws.search_paths(user.as_ref()));

    let source = FsSource::new();
    let progress =
        (!args.stdout && targets.len() > 1).then(|| ProgressDisplay::new(targets.len() as u64));

    let mut failed = 0;
    for target in &targets {
        let rel = relative_display(target, &ws.root);
        if let Some(progress) = &progress {
            progress.update(&rel);
        }

        match bundle_one(&ws, &source, &search_paths, target, &args, &out_dir) {
            Ok(summary) => {
                if !args.stdout {
                    helpers::success(&format!("{} ({})", rel, summary));
                }
            }
            Err(e) => {
                helpers::failure(&format!("{}: {}", rel, e));
                failed += 1;
            }
        }

        if let Some(progress) = &progress {
            progress.inc();
        }
    }
    if let Some(progress) = &progress {
        progress.finish();
    }

    if failed > 0 {
        return Err(SpoolError::BundleBatchFailed {
            failed,
            total: targets.len(),
        });
    }
    Ok(())
}

fn bundle_one(
    ws: &Workspace,
    source: &FsSource,
    search_paths: &[PathBuf],
    target: &Path,
    args: &BundleArgs,
    out_dir: &Path,
) -> Result<String> {
    let grammar = helpers::grammar_for_path(&ws.config, target)?;
    let mut resolver = Resolver::new(source, search_paths.to_vec());
    let doc = bundler::bundle(target, &mut resolver, &grammar, &ws.root)?;

    if args.stdout {
        print!("{}", doc.text);
        return Ok(format!("{} modules", doc.module_count));
    }

    let rel = relative_display(target, &ws.root);
    let out_path = out_dir.join(&rel);
    helpers::write_atomic(&out_path, &doc.text)?;

    Ok(if doc.module_count == 1 {
        "1 module".to_string()
    } else {
        format!("{} modules", doc.module_count)
    })
}

/// Explicit paths, or every root matched by the configured patterns for
/// both grammars
fn collect_targets(ws: &Workspace, args: &BundleArgs) -> Result<Vec<PathBuf>> {
    if !args.paths.is_empty() {
        return args.paths.iter().map(|p| helpers::absolutize(p)).collect();
    }

    let mut targets = ws.root_modules(&ws.config.script)?;
    targets.extend(ws.root_modules(&ws.config.markup)?);
    Ok(targets)
}
