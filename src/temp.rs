//! Scratch directories for repository clones
//!
//! Clones are staged in temp dirs that are removed on drop. The base is
//! always an absolute path so a relative TMPDIR (e.g. TMPDIR=tmp) can never
//! scatter clone dirs under the current working directory.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::{AirliftError, Result};

/// Absolute base directory for scratch dirs
pub(crate) fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a scratch directory for a repository clone
pub fn scratch_dir() -> Result<TempDir> {
    TempDir::with_prefix_in("airlift-", temp_dir_base()).map_err(|e| {
        AirliftError::CacheOperationFailed {
            message: format!("Failed to create scratch directory: {e}"),
        }
    })
}
