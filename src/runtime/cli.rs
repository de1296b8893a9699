//! Docker-compatible CLI runtime

use std::path::Path;
use std::process::Command;

use super::ContainerRuntime;
use crate::error::{AirliftError, Result};

/// Default runtime binary when `--runtime` is not given
pub const DEFAULT_RUNTIME: &str = "docker";

/// A container runtime driven through its command-line interface.
///
/// Works with anything that speaks the docker CLI dialect (docker, podman,
/// nerdctl). The binary name comes from `--runtime` or `AIRLIFT_RUNTIME`.
pub struct CliRuntime {
    program: String,
}

impl CliRuntime {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the runtime binary and capture its output
    fn run(&self, args: &[&str]) -> Result<std::process::Output> {
        Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| AirliftError::RuntimeCommandFailed {
                program: self.program.clone(),
                reason: e.to_string(),
            })
    }

    /// Run and require a zero exit status, folding stderr into the error
    fn run_checked(&self, args: &[&str]) -> Result<()> {
        let output = self.run(args)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(AirliftError::RuntimeCommandFailed {
                program: self.program.clone(),
                reason: command_failure(args, &output),
            })
        }
    }
}

impl Default for CliRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

impl ContainerRuntime for CliRuntime {
    fn name(&self) -> &str {
        &self.program
    }

    fn available(&self) -> bool {
        Command::new(&self.program)
            .arg("version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn image_exists(&self, reference: &str) -> Result<bool> {
        // `image inspect` exits non-zero both for a missing image and for a
        // dead daemon; either way the pipeline falls back to pulling, and a
        // dead daemon surfaces there with a proper error.
        let output = self.run(&["image", "inspect", reference])?;
        Ok(output.status.success())
    }

    fn pull(&self, reference: &str) -> Result<()> {
        self.run_checked(&["pull", reference])
    }

    fn tag(&self, source: &str, target: &str) -> Result<()> {
        let output = self.run(&["tag", source, target])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(AirliftError::RuntimeTagFailed {
                source_ref: source.to_string(),
                target: target.to_string(),
                reason: stderr_excerpt(&output),
            })
        }
    }

    fn push(&self, reference: &str) -> Result<()> {
        let output = self.run(&["push", reference])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(AirliftError::RuntimePushFailed {
                reference: reference.to_string(),
                reason: stderr_excerpt(&output),
            })
        }
    }

    fn save(&self, reference: &str, output_path: &Path) -> Result<()> {
        let path = output_path.to_string_lossy();
        self.run_checked(&["save", "-o", &path, reference])
    }
}

fn stderr_excerpt(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        format!("exited with {}", output.status)
    } else {
        trimmed.to_string()
    }
}

fn command_failure(args: &[&str], output: &std::process::Output) -> String {
    format!("'{}' failed: {}", args.join(" "), stderr_excerpt(output))
}
