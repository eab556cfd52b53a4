use clap::Parser;
use std::path::PathBuf;

/// Arguments for graph command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the flattening order of a root:\n    spool graph src/main.script\n\n\
                  Machine-readable order:\n    spool graph src/main.script --json")]
pub struct GraphArgs {
    /// Root module file
    pub root: PathBuf,

    /// Extra include search paths, tried before the configured ones
    #[arg(long = "include-path", short = 'I', value_name = "DIR")]
    pub include_paths: Vec<PathBuf>,

    /// Print the order as JSON
    #[arg(long)]
    pub json: bool,
}
