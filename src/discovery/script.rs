//! Image discovery via a repo's own listing script
//!
//! Repos that own their charm publish the image list themselves: a shell
//! script (conventionally `tools/get-images.sh`) prints one image reference
//! per line. The script runs from the repo root so its relative paths and
//! git invocations resolve.

use std::path::Path;
use std::process::Command;

use crate::error::{AirliftError, Result};
use crate::images::ImageSet;

/// Run the image listing script at `script` (relative to `root`) and collect
/// its stdout lines. `repo` names the repository in errors.
pub fn run_discovery_script(root: &Path, script: &Path, repo: &str) -> Result<ImageSet> {
    let script_path = root.join(script);
    if !script_path.is_file() {
        return Err(AirliftError::DiscoveryScriptMissing {
            repo: repo.to_string(),
            script: script.display().to_string(),
        });
    }

    let output = Command::new("bash")
        .arg(&script_path)
        .current_dir(root)
        .output()
        .map_err(|e| AirliftError::DiscoveryScriptFailed {
            repo: repo.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AirliftError::DiscoveryScriptFailed {
            repo: repo.to_string(),
            reason: if stderr.trim().is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr.trim().to_string()
            },
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().map(str::to_string).collect())
}
