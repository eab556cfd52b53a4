//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - bundle: Bundle command arguments
//! - unbundle: Unbundle command arguments
//! - graph: Graph command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod bundle;
pub mod completions;
pub mod graph;
pub mod unbundle;

pub use bundle::BundleArgs;
pub use completions::CompletionsArgs;
pub use graph::GraphArgs;
pub use unbundle::UnbundleArgs;

/// spool - include bundler for runtimes that accept one document per object
#[derive(Parser, Debug)]
#[command(
    name = "spool",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Flattens multi-file script and markup projects into single documents and back",
    long_about = "spool resolves include directives across a project's script and UI-markup \
                  files, flattens each root into a single combined document for runtimes that \
                  only accept one document per object, and splits returned documents back into \
                  the original multi-file layout.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  spool bundle                          \x1b[90m# Bundle every configured root\x1b[0m\n   \
                  spool bundle src/main.script          \x1b[90m# Bundle one root\x1b[0m\n   \
                  spool bundle src/hud.ui --stdout      \x1b[90m# Print a markup bundle\x1b[0m\n   \
                  spool unbundle out/main.script -y     \x1b[90m# Split a returned document back\x1b[0m\n   \
                  spool graph src/main.script           \x1b[90m# Show the flattening order\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Workspace directory (defaults to the nearest spool.yaml above the
    /// current directory)
    #[arg(long, short = 'w', global = true, env = "SPOOL_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten root modules into combined documents
    Bundle(BundleArgs),

    /// Split combined documents back into module files
    Unbundle(UnbundleArgs),

    /// Show the flattening order of a root module
    Graph(GraphArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_bundle() {
        let cli = Cli::try_parse_from(["spool", "bundle"]).unwrap();
        assert!(matches!(cli.command, Commands::Bundle(_)));
    }

    #[test]
    fn test_cli_parsing_bundle_with_paths() {
        let cli = Cli::try_parse_from(["spool", "bundle", "src/main.script"]).unwrap();
        match cli.command {
            Commands::Bundle(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("src/main.script")]);
            }
            _ => panic!("Expected Bundle command"),
        }
    }

    #[test]
    fn test_cli_parsing_unbundle() {
        let cli = Cli::try_parse_from(["spool", "unbundle", "out/main.script", "-y"]).unwrap();
        match cli.command {
            Commands::Unbundle(args) => {
                assert_eq!(args.files, vec![PathBuf::from("out/main.script")]);
                assert!(args.yes);
            }
            _ => panic!("Expected Unbundle command"),
        }
    }

    #[test]
    fn test_cli_parsing_graph() {
        let cli = Cli::try_parse_from(["spool", "graph", "src/main.script", "--json"]).unwrap();
        match cli.command {
            Commands::Graph(args) => {
                assert_eq!(args.root, PathBuf::from("src/main.script"));
                assert!(args.json);
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["spool", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from(["spool", "-v", "-w", "/tmp/project", "bundle"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.workspace, Some(PathBuf::from("/tmp/project")));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["spool", "completions", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, "zsh");
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
