use std::path::PathBuf;

use clap::Parser;

use crate::discovery::{DEFAULT_DISCOVERY_SCRIPT, DEFAULT_GITHUB_BASE};

/// Arguments for the mirror command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve and retag a bundle in one run:\n    \
                  airlift mirror bundle.yaml --new-registry 172.16.0.1:5000\n\n\
                  Also push the retagged images:\n    \
                  airlift mirror bundle.yaml --new-registry 172.16.0.1:5000 --push\n\n\
                  Also archive for offline transfer:\n    \
                  airlift mirror bundle.yaml --new-registry 172.16.0.1:5000 --save images.tar.gz")]
pub struct MirrorArgs {
    /// Bundle manifest to mirror
    pub bundle: PathBuf,

    /// Target registry prefix for the retagged names
    #[arg(long, value_name = "PREFIX")]
    pub new_registry: String,

    /// Push each retagged image to the target registry
    #[arg(long)]
    pub push: bool,

    /// Also archive the resolved images to this path
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Warn and continue when an image exhausts its save retries
    #[arg(long)]
    pub skip_failed: bool,

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
