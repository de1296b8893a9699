//! Bundle-to-image resolution
//!
//! Walks a bundle's applications, fetches each one's source repo at its
//! pinned branch, and collects image references from whichever discovery
//! path the application declares: the repo's own listing script, or the
//! charm metadata of a dependency repo. Results merge into one sorted,
//! deduplicated `ImageSet`.

pub mod metadata;
pub mod script;

use std::path::{Path, PathBuf};

use crate::bundle::{Bundle, DiscoverySource};
use crate::cache;
use crate::error::Result;
use crate::images::ImageSet;

/// Default base for resolving bare repo names to clone URLs
pub const DEFAULT_GITHUB_BASE: &str = "https://github.com/canonical";

/// Conventional image listing script inside owning repos
pub const DEFAULT_DISCOVERY_SCRIPT: &str = "tools/get-images.sh";

/// Knobs shared by every discovery invocation
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Base URL (or local path, for fixtures) prepended to repo names
    pub github_base: String,
    /// Image listing script, relative to each repo root
    pub script: PathBuf,
    /// Reuse cached checkouts keyed by commit sha
    pub use_cache: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            github_base: DEFAULT_GITHUB_BASE.to_string(),
            script: PathBuf::from(DEFAULT_DISCOVERY_SCRIPT),
            use_cache: true,
        }
    }
}

/// Build the clone URL for a bare repo name.
///
/// http(s) bases get the conventional `.git` suffix; scp-style and local
/// path bases are joined as-is.
pub fn repo_url(base: &str, repo: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.starts_with("https://") || base.starts_with("http://") {
        format!("{base}/{repo}.git")
    } else {
        format!("{base}/{repo}")
    }
}

/// A checked-out source repo, either cached or scratch.
///
/// Holding the value keeps a scratch checkout alive; cached checkouts
/// persist regardless.
pub struct FetchedRepo {
    pub root: PathBuf,
    pub sha: String,
    _scratch: Option<tempfile::TempDir>,
}

/// Fetch a repo at a pinned branch (repo HEAD when unset)
pub fn fetch_source(
    repo: &str,
    branch: Option<&str>,
    options: &DiscoveryOptions,
) -> Result<FetchedRepo> {
    let url = repo_url(&options.github_base, repo);
    if options.use_cache {
        let (root, sha) = cache::fetch_repo(&url, branch)?;
        Ok(FetchedRepo {
            root,
            sha,
            _scratch: None,
        })
    } else {
        let (scratch, sha) = cache::fetch_repo_uncached(&url, branch)?;
        Ok(FetchedRepo {
            root: scratch.path().to_path_buf(),
            sha,
            _scratch: Some(scratch),
        })
    }
}

/// Discover the images for one application
pub fn discover(source: &DiscoverySource, options: &DiscoveryOptions) -> Result<ImageSet> {
    match source {
        DiscoverySource::Excluded => Ok(ImageSet::new()),
        DiscoverySource::Direct { repo, branch } => {
            let fetched = fetch_source(repo, branch.as_deref(), options)?;
            script::run_discovery_script(&fetched.root, &options.script, repo)
        }
        DiscoverySource::Dependency { repo, branch } => {
            let fetched = fetch_source(repo, branch.as_deref(), options)?;
            metadata::collect_images(&fetched.root, repo)
        }
    }
}

/// Resolve a whole bundle into one sorted, deduplicated image set.
///
/// Metadata validation runs up front: nothing is cloned until every
/// application either names a source repo or is explicitly excluded.
pub fn resolve_bundle(bundle: &Bundle, options: &DiscoveryOptions) -> Result<ImageSet> {
    let mut images = ImageSet::new();
    for (_, source) in bundle.discovery_targets()? {
        images.merge(discover(&source, options)?);
    }
    Ok(images)
}
