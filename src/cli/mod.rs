//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - resolve: Resolve command arguments
//! - retag: Retag command arguments
//! - save: Save command arguments
//! - mirror: Mirror command arguments
//! - cache: Cache command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod cache;
pub mod completions;
pub mod mirror;
pub mod resolve;
pub mod retag;
pub mod save;

pub use cache::{CacheArgs, CacheSubcommand};
pub use completions::CompletionsArgs;
pub use mirror::MirrorArgs;
pub use resolve::ResolveArgs;
pub use retag::RetagArgs;
pub use save::SaveArgs;

/// Airlift - airgapped image mirroring for Juju charm bundles
#[derive(Parser, Debug)]
#[command(
    name = "airlift",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Airgapped image mirroring for Juju charm bundles",
    long_about = "Airlift resolves a charm bundle manifest to the container images it needs, \
                  then pulls, retags, pushes and/or archives those images so a cluster with \
                  no internet access can still obtain them.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  airlift resolve bundle.yaml                             \x1b[90m# List a bundle's images\x1b[0m\n   \
                  airlift retag images.txt --new-registry 172.16.0.1:5000 \x1b[90m# Pull and retag for a mirror\x1b[0m\n   \
                  airlift save images.txt -o images.tar.gz                \x1b[90m# Archive images for transfer\x1b[0m\n   \
                  airlift mirror bundle.yaml --new-registry 172.16.0.1:5000 --save images.tar.gz\n   \
                  airlift cache                                           \x1b[90m# Show repo cache statistics\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Container runtime binary (docker-compatible CLI)
    #[arg(
        long,
        global = true,
        env = "AIRLIFT_RUNTIME",
        default_value = "docker",
        value_name = "BIN"
    )]
    pub runtime: String,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a bundle manifest to its container image list
    Resolve(ResolveArgs),

    /// Pull images and retag them for a target registry
    Retag(RetagArgs),

    /// Save images to a combined tarball archive
    Save(SaveArgs),

    /// Resolve, retag and archive a bundle in one run
    Mirror(MirrorArgs),

    /// Manage the repository clone cache
    #[command(name = "cache")]
    Cache(CacheArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
