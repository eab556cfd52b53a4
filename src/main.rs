//! spool - bidirectional include bundler
//!
//! Flattens a project's many small script and UI-markup files into the
//! single combined documents an external runtime expects, and splits the
//! documents the runtime returns back into the original multi-file layout.

use clap::Parser;

mod bundler;
mod cli;
mod commands;
mod config;
mod error;
mod grammar;
mod hash;
mod module;
mod progress;
mod resolver;
mod source;
mod unbundler;
mod workspace;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Bundle(args) => commands::bundle::run(cli.workspace, args),
        Commands::Unbundle(args) => commands::unbundle::run(cli.workspace, args),
        Commands::Graph(args) => commands::graph::run(cli.workspace, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
