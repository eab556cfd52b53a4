use clap::Parser;
use std::path::PathBuf;

/// Arguments for bundle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Bundle every configured root:\n    spool bundle\n\n\
                  Bundle specific roots:\n    spool bundle src/main.script src/hud.ui\n\n\
                  Bundle with an extra include path:\n    spool bundle -I vendor/modules src/main.script\n\n\
                  Print one bundle to stdout:\n    spool bundle src/main.script --stdout")]
pub struct BundleArgs {
    /// Root module files to bundle (defaults to the configured root patterns)
    pub paths: Vec<PathBuf>,

    /// Extra include search paths, tried before the configured ones
    #[arg(long = "include-path", short = 'I', value_name = "DIR")]
    pub include_paths: Vec<PathBuf>,

    /// Output directory (defaults to the configured output_dir)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Print the combined document instead of writing it (single root only)
    #[arg(long)]
    pub stdout: bool,
}
