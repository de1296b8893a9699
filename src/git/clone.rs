//! Repository cloning

use std::path::Path;

use git2::{ErrorClass, FetchOptions, RemoteCallbacks, Repository, build::RepoBuilder};

use super::auth::setup_auth_callbacks;
use crate::error::{AirliftError, Result};

fn is_local_url(url: &str) -> bool {
    url.starts_with("file://") || url.starts_with('/') || Path::new(url).is_absolute()
}

/// Interpret a git2 error and provide a more user-friendly message
fn interpret_git_error(err: &git2::Error) -> String {
    let message = err.message().to_lowercase();

    if message.contains("not found") || message.contains("404") {
        "Repository not found".to_string()
    } else if message.contains("authentication") || message.contains("credentials") {
        "Authentication failed".to_string()
    } else if message.contains("connection")
        || message.contains("network")
        || message.contains("timed out")
        || message.contains("timeout")
    {
        "Network error".to_string()
    } else if err.class() == ErrorClass::Http {
        format!("HTTP error: {}", err.message())
    } else {
        err.message().to_string()
    }
}

/// Clone a git repository to a target directory
///
/// Remote clones are shallow (depth=1) when `shallow` is set; local paths and
/// file:// URLs are always full clones since libgit2 does not support local
/// shallow transport.
pub fn clone(url: &str, target: &Path, shallow: bool) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    if shallow && !is_local_url(url) {
        fetch_options.depth(1);
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);

    builder.clone(url, target).map_err(|e| {
        let reason = interpret_git_error(&e);
        AirliftError::GitCloneFailed {
            url: url.to_string(),
            reason,
        }
    })
}
