use clap::Parser;
use std::path::PathBuf;

/// Arguments for unbundle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Split a returned document back into module files:\n    spool unbundle returned/main.script\n\n\
                  Overwrite modified module files without asking:\n    spool unbundle returned/main.script --yes")]
pub struct UnbundleArgs {
    /// Combined documents to split back into module files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Overwrite existing module files without confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Directory for unsplit payloads and recovered segments
    /// (defaults to the configured output_dir)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out: Option<PathBuf>,
}
