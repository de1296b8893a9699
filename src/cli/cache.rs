use clap::{Parser, Subcommand};

/// Arguments for cache command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show cache statistics:\n    airlift cache\n\n\
                  List cached repositories:\n    airlift cache list\n\n\
                  Clear all cached repositories:\n    airlift cache clear\n\n\
                  Remove a specific repository:\n    airlift cache clear --only github.com-canonical-training-operator")]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: Option<CacheSubcommand>,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// List cached repositories
    List,

    /// Clear cached repositories
    Clear(ClearCacheArgs),
}

/// Arguments for cache clear command
#[derive(Parser, Debug)]
pub struct ClearCacheArgs {
    /// Remove only a specific repository by slug
    #[arg(long, value_name = "SLUG")]
    pub only: Option<String>,
}
