//! Cache command implementation

use crate::cache;
use crate::cli::{CacheArgs, CacheSubcommand};
use crate::error::Result;

pub fn run(args: CacheArgs) -> Result<()> {
    if let Some(command) = args.command {
        match command {
            CacheSubcommand::List => {
                list_cached_repos()?;
                return Ok(());
            }
            CacheSubcommand::Clear(clear_args) => {
                if let Some(slug) = clear_args.only {
                    clean_specific_repo(&slug)?;
                } else {
                    clean_all_cache()?;
                }
                return Ok(());
            }
        }
    }

    // Default: show only cache statistics
    show_cache_stats()?;

    Ok(())
}

fn print_stats_header() -> Result<()> {
    let stats = cache::cache_stats()?;
    let cache_dir = cache::cache_dir()?;

    println!("Cache Statistics:");
    println!("  Location: {}", cache_dir.display());
    println!("  Repositories: {}", stats.repositories);
    println!("  Versions: {}", stats.versions);
    println!("  Size: {}", stats.formatted_size());
    Ok(())
}

fn show_cache_stats() -> Result<()> {
    print_stats_header()?;

    let stats = cache::cache_stats()?;
    if stats.repositories == 0 {
        println!("\nCache is empty.");
    } else {
        println!("\nRun 'airlift cache list' to list cached repositories.");
        println!("Run 'airlift cache clear' to remove everything from cache.");
        println!("Run 'airlift cache clear --only <slug>' to remove a specific repository.");
    }

    Ok(())
}

fn list_cached_repos() -> Result<()> {
    print_stats_header()?;
    println!();

    let repos = cache::list_cached_repos()?;

    if repos.is_empty() {
        println!("No cached repositories.");
        return Ok(());
    }

    println!("Cached repositories ({}):", repos.len());
    for repo in &repos {
        println!(
            "  {} ({} version{}, {})",
            repo.slug,
            repo.versions,
            if repo.versions == 1 { "" } else { "s" },
            repo.formatted_size()
        );
    }

    Ok(())
}

fn clean_all_cache() -> Result<()> {
    cache::clear_cache()?;
    println!("Cache cleared successfully.");
    Ok(())
}

fn clean_specific_repo(slug: &str) -> Result<()> {
    if cache::remove_cached_repo(slug)? {
        println!("Removed cached repository: {}", slug);
    } else {
        println!("No cached repository named '{}'", slug);
    }
    Ok(())
}
