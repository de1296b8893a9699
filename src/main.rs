//! Airlift - airgapped image mirroring for Juju charm bundles
//!
//! Resolves a charm bundle manifest to the container images it needs, then
//! pulls, retags, pushes and/or archives those images so a cluster with no
//! internet access can still obtain them.

use clap::Parser;

mod archive;
mod bundle;
mod cache;
mod cli;
mod commands;
mod discovery;
mod error;
mod git;
mod images;
mod mover;
mod progress;
mod reference;
mod runtime;
mod temp;
#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use error::Result;
use runtime::CliRuntime;

/// Check that the configured container runtime responds
fn check_runtime_available(program: &str) -> Result<()> {
    runtime::ensure_available(&CliRuntime::new(program))
}

fn main() {
    let cli = Cli::parse();

    // Check the container runtime for commands that drive it
    // Resolve, cache, version, and completions run without a runtime
    let needs_runtime = matches!(
        cli.command,
        Commands::Retag(_) | Commands::Save(_) | Commands::Mirror(_)
    );

    if needs_runtime {
        if let Err(e) = check_runtime_available(&cli.runtime) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args, cli.verbose),
        Commands::Retag(args) => commands::retag::run(&cli.runtime, args),
        Commands::Save(args) => commands::save::run(&cli.runtime, args),
        Commands::Mirror(args) => commands::mirror::run(&cli.runtime, args, cli.verbose),
        Commands::Cache(args) => commands::clean_cache::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
