//! Graph command implementation
//!
//! Resolution and graph construction only, no emission: shows the
//! deterministic flattening order of a root module.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::GraphArgs;
use crate::commands::helpers;
use crate::config::UserConfig;
use crate::error::Result;
use crate::resolver::Resolver;
use crate::resolver::graph::{build_graph, relative_display};
use crate::source::FsSource;
use crate::workspace::Workspace;

#[derive(Serialize)]
struct GraphReport {
    root: String,
    /// Flattening order: dependencies before dependents
    modules: Vec<String>,
}

/// Run graph command
pub fn run(workspace: Option<PathBuf>, args: GraphArgs) -> Result<()> {
    let ws = Workspace::discover(workspace)?;
    let user = UserConfig::load()?;

    let target = helpers::absolutize(&args.root)?;
    let grammar = helpers::grammar_for_path(&ws.config, &target)?;

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
    let mut resolver = Resolver::new(&source, search_paths);
    let graph = build_graph(&target, &mut resolver, &grammar, &ws.root)?;

    let report = GraphReport {
        root: relative_display(&target, &ws.root),
        modules: graph
            .flatten_order()
            .iter()
            .map(|p| relative_display(p, &ws.root))
            .collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Flattening order for {}:", report.root);
        for (idx, module) in report.modules.iter().enumerate() {
            println!("{:>4}  {}", idx + 1, module);
        }
    }

    Ok(())
}
