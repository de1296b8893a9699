//! Clone cache for charm repositories
//!
//! Repeated runs against the same bundle hit the same handful of charm repos;
//! caching clones by URL and commit SHA avoids recloning unchanged branches.
//!
//! ## Cache structure
//!
//! ```text
//! ~/.cache/airlift/
//! └── repos/
//!     └── <url-slug>/
//!         └── <git-sha>/
//!             └── <checked-out tree>
//! ```
//!
//! The cache key is composed of:
//! - URL slug: normalized URL with special chars replaced
//!   (e.g. "github.com-canonical-training-operator")
//! - Git SHA: exact commit SHA for reproducibility
//!
//! `AIRLIFT_CACHE_DIR` overrides the cache location.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AirliftError, Result};
use crate::git;
use crate::temp;

/// Cache directory name under the user's cache directory
const CACHE_DIR: &str = "airlift";

/// Repos subdirectory within the cache
const REPOS_DIR: &str = "repos";

/// Get the cache directory path, honoring `AIRLIFT_CACHE_DIR`
pub fn cache_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("AIRLIFT_CACHE_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::cache_dir().ok_or_else(|| AirliftError::CacheOperationFailed {
        message: "Could not determine cache directory".to_string(),
    })?;

    Ok(base.join(CACHE_DIR))
}

/// Get the repos cache directory path
pub fn repos_cache_dir() -> Result<PathBuf> {
    Ok(cache_dir()?.join(REPOS_DIR))
}

/// Generate a cache key (URL slug) from a git URL
///
/// Example: "https://github.com/canonical/training-operator.git" ->
/// "github.com-canonical-training-operator"
pub fn url_to_slug(url: &str) -> String {
    url.replace("https://", "")
        .replace("http://", "")
        .replace("git@", "")
        .replace("file://", "")
        .replace([':', '/'], "-")
        .replace(".git", "")
        .trim_matches('-')
        .to_string()
}

/// Cache path for a specific repo at a specific commit
pub fn repo_cache_path(url: &str, sha: &str) -> Result<PathBuf> {
    let slug = url_to_slug(url);
    Ok(repos_cache_dir()?.join(slug).join(sha))
}

/// Get a cached checkout if it exists
pub fn get_cached(url: &str, sha: &str) -> Result<Option<PathBuf>> {
    let path = repo_cache_path(url, sha)?;
    if path.is_dir() {
        Ok(Some(path))
    } else {
        Ok(None)
    }
}

/// Fetch a repo at a pinned ref into the cache, returning (path, sha).
///
/// Tries `git ls-remote` first so an unchanged branch is a pure cache hit
/// with no clone. Otherwise clones shallowly into a scratch dir, resolves
/// the ref, checks out detached, and moves the tree into the cache.
pub fn fetch_repo(url: &str, git_ref: Option<&str>) -> Result<(PathBuf, String)> {
    if let Ok(sha) = git::ls_remote(url, git_ref) {
        if let Some(path) = get_cached(url, &sha)? {
            return Ok((path, sha));
        }
    }

    let scratch = temp::scratch_dir()?;
    let repo = git::clone(url, scratch.path(), true)?;
    let sha = git::resolve_ref(&repo, git_ref)?;

    if let Some(path) = get_cached(url, &sha)? {
        return Ok((path, sha));
    }

    git::checkout_commit(&repo, &sha)?;

    let cache_path = repo_cache_path(url, &sha)?;
    if let Some(parent) = cache_path.parent() {
        fs::create_dir_all(parent).map_err(|e| AirliftError::CacheOperationFailed {
            message: format!("Failed to create cache directory: {e}"),
        })?;
    }

    // The scratch dir may be on a different filesystem, so copy rather
    // than rename
    copy_dir_recursive(scratch.path(), &cache_path)?;

    Ok((cache_path, sha))
}

/// Clone a repo at a pinned ref into a scratch dir, bypassing the cache.
///
/// Returns the TempDir so the checkout lives exactly as long as the caller
/// holds it.
pub fn fetch_repo_uncached(
    url: &str,
    git_ref: Option<&str>,
) -> Result<(tempfile::TempDir, String)> {
    let scratch = temp::scratch_dir()?;
    let repo = git::clone(url, scratch.path(), true)?;
    let sha = git::resolve_ref(&repo, git_ref)?;
    git::checkout_commit(&repo, &sha)?;
    Ok((scratch, sha))
}

/// Copy a directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    if !dst.exists() {
        fs::create_dir_all(dst).map_err(|e| AirliftError::CacheOperationFailed {
            message: format!("Failed to create directory {}: {e}", dst.display()),
        })?;
    }

    for entry in fs::read_dir(src).map_err(|e| AirliftError::CacheOperationFailed {
        message: format!("Failed to read directory {}: {e}", src.display()),
    })? {
        let entry = entry.map_err(|e| AirliftError::CacheOperationFailed {
            message: format!("Failed to read entry: {e}"),
        })?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).map_err(|e| {
                AirliftError::CacheOperationFailed {
                    message: format!(
                        "Failed to copy {} to {}: {e}",
                        src_path.display(),
                        dst_path.display()
                    ),
                }
            })?;
        }
    }

    Ok(())
}

/// Remove the entire repo cache
pub fn clear_cache() -> Result<()> {
    let path = repos_cache_dir()?;
    if path.exists() {
        fs::remove_dir_all(&path).map_err(|e| AirliftError::CacheOperationFailed {
            message: format!("Failed to clear cache: {e}"),
        })?;
    }
    Ok(())
}

/// Summary of one cached repository
#[derive(Debug, Clone)]
pub struct CachedRepo {
    /// URL slug (e.g. "github.com-canonical-training-operator")
    pub slug: String,
    /// Number of cached commits
    pub versions: usize,
    /// Total size in bytes
    pub size: u64,
}

impl CachedRepo {
    /// Format size as a human-readable string
    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }
}

/// Aggregate statistics over the whole repo cache
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub repositories: usize,
    pub versions: usize,
    pub size: u64,
}

impl CacheStats {
    /// Format size as a human-readable string
    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }
}

fn format_size(size: u64) -> String {
    let s = size as f64;
    if s < 1024.0 {
        format!("{size} B")
    } else if s < 1024.0 * 1024.0 {
        format!("{:.1} KB", s / 1024.0)
    } else if s < 1024.0 * 1024.0 * 1024.0 {
        format!("{:.1} MB", s / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", s / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Aggregate cache statistics
pub fn cache_stats() -> Result<CacheStats> {
    let mut stats = CacheStats::default();
    for repo in list_cached_repos()? {
        stats.repositories += 1;
        stats.versions += repo.versions;
        stats.size += repo.size;
    }
    Ok(stats)
}

/// Remove one cached repository by slug, returning whether it existed
pub fn remove_cached_repo(slug: &str) -> Result<bool> {
    let path = repos_cache_dir()?.join(slug);
    if !path.is_dir() {
        return Ok(false);
    }
    fs::remove_dir_all(&path).map_err(|e| AirliftError::CacheOperationFailed {
        message: format!("Failed to remove '{slug}' from cache: {e}"),
    })?;
    Ok(true)
}

/// List all cached repositories, sorted by slug
pub fn list_cached_repos() -> Result<Vec<CachedRepo>> {
    let path = repos_cache_dir()?;
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut repos = Vec::new();
    for entry in fs::read_dir(&path).map_err(|e| AirliftError::CacheOperationFailed {
        message: format!("Failed to read cache directory: {e}"),
    })? {
        let entry = entry.map_err(|e| AirliftError::CacheOperationFailed {
            message: format!("Failed to read entry: {e}"),
        })?;
        if !entry.path().is_dir() {
            continue;
        }

        let slug = entry.file_name().to_string_lossy().to_string();
        let mut versions = 0;
        let mut size = 0u64;
        if let Ok(shas) = fs::read_dir(entry.path()) {
            for sha_entry in shas.flatten() {
                if sha_entry.path().is_dir() {
                    versions += 1;
                    size += dir_size(&sha_entry.path());
                }
            }
        }

        repos.push(CachedRepo {
            slug,
            versions,
            size,
        });
    }

    repos.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(repos)
}

/// Total size of a directory tree in bytes (best effort)
fn dir_size(path: &Path) -> u64 {
    let mut size = 0u64;
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            let entry_path = entry.path();
            if entry_path.is_dir() {
                size += dir_size(&entry_path);
            } else if let Ok(metadata) = entry.metadata() {
                size += metadata.len();
            }
        }
    }
    size
}
