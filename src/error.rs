//! Error types and handling for airlift
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Only the bounded-retry paths (image pull, image save) absorb failures, and
//! only up to their attempt budget; everything else propagates.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for airlift operations
#[derive(Error, Diagnostic, Debug)]
pub enum AirliftError {
    // Bundle manifest errors
    #[error("Failed to read bundle manifest: {path}")]
    #[diagnostic(code(airlift::bundle::read_failed))]
    BundleReadFailed { path: String, reason: String },

    #[error("Failed to parse bundle manifest: {path}")]
    #[diagnostic(
        code(airlift::bundle::parse_failed),
        help("The manifest must be a YAML document with an 'applications' mapping")
    )]
    BundleParseFailed { path: String, reason: String },

    #[error("Application '{application}' has no discovery metadata")]
    #[diagnostic(
        code(airlift::bundle::missing_metadata),
        help(
            "Add '_github_repo_name' (and optionally '_github_repo_branch'), or \
             '_github_dependency_repo_name' for charms whose images come from a \
             dependency repo, or mark the application with '_airgap_exclude: true'"
        )
    )]
    MissingDiscoveryMetadata { application: String },

    #[error("Bundle validation failed: {message}")]
    #[diagnostic(code(airlift::bundle::validation_failed))]
    BundleValidationFailed { message: String },

    // Image reference errors
    #[error("Invalid image reference '{reference}': {reason}")]
    #[diagnostic(
        code(airlift::reference::invalid),
        help("Expected [registry/]repository[:tag][@digest]")
    )]
    InvalidImageReference { reference: String, reason: String },

    // Git errors
    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(airlift::git::clone_failed),
        help("Check that the URL is correct and you have access to the repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to resolve git ref '{git_ref}': {reason}")]
    #[diagnostic(code(airlift::git::ref_resolve_failed))]
    GitRefResolveFailed { git_ref: String, reason: String },

    #[error("Failed to checkout commit '{sha}': {reason}")]
    #[diagnostic(code(airlift::git::checkout_failed))]
    GitCheckoutFailed { sha: String, reason: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(airlift::git::operation_failed))]
    GitOperationFailed { message: String },

    // Discovery errors
    #[error("Image discovery script not found in '{repo}': {script}")]
    #[diagnostic(
        code(airlift::discovery::script_missing),
        help("The charm repository must ship an image listing script (default: tools/get-images.sh)")
    )]
    DiscoveryScriptMissing { repo: String, script: String },

    #[error("Image discovery script failed in '{repo}': {reason}")]
    #[diagnostic(code(airlift::discovery::script_failed))]
    DiscoveryScriptFailed { repo: String, reason: String },

    #[error("No oci-image resources declared in '{repo}'")]
    #[diagnostic(
        code(airlift::discovery::no_image_resources),
        help("The dependency repo must declare resources of type 'oci-image' in a metadata.yaml")
    )]
    NoImageResources { repo: String },

    // Container runtime errors
    #[error("Container runtime '{program}' is not available")]
    #[diagnostic(
        code(airlift::runtime::unavailable),
        help(
            "Install docker (https://docs.docker.com/engine/install/) or pass a \
             compatible runtime with --runtime (e.g. --runtime podman)"
        )
    )]
    RuntimeUnavailable { program: String },

    #[error("Failed to pull '{reference}' after {attempts} attempts: {reason}")]
    #[diagnostic(
        code(airlift::runtime::pull_failed),
        help("Check registry availability and that the image reference exists")
    )]
    RuntimePullFailed {
        reference: String,
        attempts: u32,
        reason: String,
    },

    #[error("Failed to tag '{source_ref}' as '{target}': {reason}")]
    #[diagnostic(code(airlift::runtime::tag_failed))]
    RuntimeTagFailed {
        // Named `source_ref` because thiserror reserves `source` for error chaining.
        source_ref: String,
        target: String,
        reason: String,
    },

    #[error("Failed to push '{reference}': {reason}")]
    #[diagnostic(
        code(airlift::runtime::push_failed),
        help("Check that you are logged in to the target registry")
    )]
    RuntimePushFailed { reference: String, reason: String },

    #[error("Failed to save '{reference}' after {attempts} attempts: {reason}")]
    #[diagnostic(
        code(airlift::runtime::save_failed),
        help("Re-run with --skip-failed to archive the remaining images anyway")
    )]
    RuntimeSaveFailed {
        reference: String,
        attempts: u32,
        reason: String,
    },

    #[error("Failed to run '{program}': {reason}")]
    #[diagnostic(code(airlift::runtime::command_failed))]
    RuntimeCommandFailed { program: String, reason: String },

    // Archive errors
    #[error("Failed to assemble archive '{}': {reason}", path.display())]
    #[diagnostic(code(airlift::archive::failed))]
    ArchiveFailed { path: PathBuf, reason: String },

    #[error("Nothing to archive: all {count} images failed to save")]
    #[diagnostic(code(airlift::archive::empty))]
    ArchiveEmpty { count: usize },

    // Cache errors
    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(airlift::cache::operation_failed))]
    CacheOperationFailed { message: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(airlift::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(airlift::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(airlift::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for AirliftError {
    fn from(err: std::io::Error) -> Self {
        AirliftError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AirliftError {
    fn from(err: serde_yaml::Error) -> Self {
        AirliftError::BundleParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for AirliftError {
    fn from(err: git2::Error) -> Self {
        AirliftError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AirliftError>;
