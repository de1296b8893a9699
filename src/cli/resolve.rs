use std::path::PathBuf;

use clap::Parser;

use crate::discovery::{DEFAULT_DISCOVERY_SCRIPT, DEFAULT_GITHUB_BASE};

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve a bundle to images.txt:\n    airlift resolve bundle.yaml\n\n\
                  Write the list to stdout for piping:\n    airlift resolve bundle.yaml -o -\n\n\
                  Resolve against a GitHub fork:\n    airlift resolve bundle.yaml --github-base https://github.com/myorg\n\n\
                  Always clone fresh (skip the repo cache):\n    airlift resolve bundle.yaml --no-cache")]
pub struct ResolveArgs {
    /// Bundle manifest to resolve
    pub bundle: PathBuf,

    /// Output file for the image list ("-" writes to stdout)
    #[arg(long, short = 'o', default_value = "images.txt", value_name = "FILE")]
    pub output: PathBuf,

    /// Base URL for resolving bare repo names
    #[arg(
        long,
        env = "AIRLIFT_GITHUB_BASE",
        default_value = DEFAULT_GITHUB_BASE,
        value_name = "URL"
    )]
    pub github_base: String,

    /// Image listing script path inside each repo
    #[arg(long, default_value = DEFAULT_DISCOVERY_SCRIPT, value_name = "PATH")]
    pub script: PathBuf,

    /// Clone into scratch directories instead of the repo cache
    #[arg(long)]
    pub no_cache: bool,
}
