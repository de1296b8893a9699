//! Container runtime client
//!
//! `ContainerRuntime` is the injected seam in front of the container runtime:
//! production code shells out to the docker CLI (or any compatible runtime
//! picked with `--runtime`), tests substitute a fake. All operations are
//! blocking and strictly sequential.
//!
//! The bounded-retry policies live here too: pulls get 3 attempts with
//! doubling backoff, saves get 10 attempts with a fixed pause, and a save
//! that still fails deletes its partial output file before reporting.

mod cli;

use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::error::{AirliftError, Result};

pub use cli::CliRuntime;

/// Pull attempts before giving up
pub const PULL_ATTEMPTS: u32 = 3;

/// Save attempts before giving up
pub const SAVE_ATTEMPTS: u32 = 10;

/// Base delay between pull attempts (doubles each retry)
const PULL_BACKOFF: Duration = Duration::from_secs(2);

/// Fixed delay between save attempts
const SAVE_BACKOFF: Duration = Duration::from_secs(1);

/// Operations the mirroring pipeline needs from a container runtime
pub trait ContainerRuntime {
    /// Human-readable runtime name (e.g. "docker") for diagnostics
    fn name(&self) -> &str;

    /// Whether the runtime responds at all
    fn available(&self) -> bool;

    /// Whether an image is already present in the local image store
    fn image_exists(&self, reference: &str) -> Result<bool>;

    /// Pull an image from its registry (single attempt)
    fn pull(&self, reference: &str) -> Result<()>;

    /// Tag `source` with the additional name `target`
    fn tag(&self, source: &str, target: &str) -> Result<()>;

    /// Push an image to its registry
    fn push(&self, reference: &str) -> Result<()>;

    /// Serialize an image to a tarball at `output` (single attempt)
    fn save(&self, reference: &str, output: &Path) -> Result<()>;
}

/// Fail early with install instructions if the runtime is missing
pub fn ensure_available(runtime: &dyn ContainerRuntime) -> Result<()> {
    if runtime.available() {
        Ok(())
    } else {
        Err(AirliftError::RuntimeUnavailable {
            program: runtime.name().to_string(),
        })
    }
}

/// Pull unless the image is already in the local store.
///
/// Returns true if a pull happened, false on a local cache hit.
pub fn ensure_present(runtime: &dyn ContainerRuntime, reference: &str) -> Result<bool> {
    if runtime.image_exists(reference)? {
        return Ok(false);
    }
    pull_with_retry(runtime, reference)?;
    Ok(true)
}

/// Pull with the bounded retry policy (3 attempts, doubling backoff)
pub fn pull_with_retry(runtime: &dyn ContainerRuntime, reference: &str) -> Result<()> {
    pull_with_retry_delay(runtime, reference, PULL_BACKOFF)
}

pub(crate) fn pull_with_retry_delay(
    runtime: &dyn ContainerRuntime,
    reference: &str,
    base_delay: Duration,
) -> Result<()> {
    let mut delay = base_delay;
    let mut last_reason = String::new();
    for attempt in 1..=PULL_ATTEMPTS {
        match runtime.pull(reference) {
            Ok(()) => return Ok(()),
            Err(e) => last_reason = failure_reason(e),
        }
        if attempt < PULL_ATTEMPTS {
            thread::sleep(delay);
            delay = delay.saturating_mul(2);
        }
    }
    Err(AirliftError::RuntimePullFailed {
        reference: reference.to_string(),
        attempts: PULL_ATTEMPTS,
        reason: last_reason,
    })
}

/// Save with the bounded retry policy (10 attempts, fixed pause).
///
/// On final failure the partial output file is removed and the error names
/// the image and the attempt count; the caller decides whether that fails
/// the batch.
pub fn save_with_retry(
    runtime: &dyn ContainerRuntime,
    reference: &str,
    output: &Path,
) -> Result<()> {
    save_with_retry_delay(runtime, reference, output, SAVE_BACKOFF)
}

pub(crate) fn save_with_retry_delay(
    runtime: &dyn ContainerRuntime,
    reference: &str,
    output: &Path,
    delay: Duration,
) -> Result<()> {
    let mut last_reason = String::new();
    for attempt in 1..=SAVE_ATTEMPTS {
        match runtime.save(reference, output) {
            Ok(()) => return Ok(()),
            Err(e) => last_reason = failure_reason(e),
        }
        if attempt < SAVE_ATTEMPTS {
            thread::sleep(delay);
        }
    }

    // Do not leave a truncated tarball behind
    if output.exists() {
        let _ = std::fs::remove_file(output);
    }

    Err(AirliftError::RuntimeSaveFailed {
        reference: reference.to_string(),
        attempts: SAVE_ATTEMPTS,
        reason: last_reason,
    })
}

/// Extract the underlying reason from a single-attempt runtime error
fn failure_reason(err: AirliftError) -> String {
    match err {
        AirliftError::RuntimePullFailed { reason, .. }
        | AirliftError::RuntimeSaveFailed { reason, .. }
        | AirliftError::RuntimeCommandFailed { reason, .. } => reason,
        other => other.to_string(),
    }
}
