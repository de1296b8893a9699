//! Image tarball archiver
//!
//! Serializes each image to its own tarball next to the final archive
//! destination, then combines the parts into one gzip-compressed
//! `images.tar.gz` and removes the intermediates. A save that exhausts its
//! retries fails the run unless `skip_failed` downgrades it to a recorded
//! skip; a run where every image failed never produces an empty archive.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::Builder;

use crate::error::{AirliftError, Result};
use crate::images::ImageSet;
use crate::progress::ProgressDisplay;
use crate::runtime::{self, ContainerRuntime};

/// Default combined archive filename
pub const DEFAULT_ARCHIVE_NAME: &str = "images.tar.gz";

/// Knobs for an archive run
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    /// Combined archive destination
    pub output: PathBuf,
    /// Record save failures and continue instead of failing the run
    pub skip_failed: bool,
    /// Leave the per-image tarballs next to the archive
    pub keep_parts: bool,
    /// Pause between save attempts (shrunk in tests)
    pub save_delay: Duration,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_ARCHIVE_NAME),
            skip_failed: false,
            keep_parts: false,
            save_delay: Duration::from_secs(1),
        }
    }
}

/// An image left out of the archive under `skip_failed`
#[derive(Debug)]
pub struct SkippedImage {
    pub reference: String,
    pub reason: String,
}

/// What an archive run produced
#[derive(Debug)]
pub struct ArchiveSummary {
    pub archive: PathBuf,
    pub saved: Vec<String>,
    pub skipped: Vec<SkippedImage>,
}

/// Filesystem-safe part filename for an image reference
pub fn tar_part_name(reference: &str) -> String {
    format!("{}.tar", reference.replace(['/', ':', '@'], "-"))
}

/// Pull (if absent) and save every image, then combine the parts into the
/// configured archive.
pub fn archive_images(
    runtime_client: &dyn ContainerRuntime,
    images: &ImageSet,
    options: &ArchiveOptions,
    progress: Option<&ProgressDisplay>,
) -> Result<ArchiveSummary> {
    if images.is_empty() {
        return Err(AirliftError::ArchiveEmpty { count: 0 });
    }

    let parts_dir = parts_dir(&options.output);
    if !parts_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&parts_dir)?;
    }

    let total = images.len();
    let mut parts = Vec::new();
    let mut saved = Vec::new();
    let mut skipped = Vec::new();

    for (current, reference) in images.iter().enumerate() {
        if let Some(pb) = progress {
            pb.update_image(reference, current + 1, total);
        }

        match save_part(runtime_client, reference, &parts_dir, options.save_delay) {
            Ok(part) => {
                parts.push(part);
                saved.push(reference.to_string());
            }
            Err(e) if options.skip_failed => skipped.push(SkippedImage {
                reference: reference.to_string(),
                reason: e.to_string(),
            }),
            Err(e) => return Err(e),
        }

        if let Some(pb) = progress {
            pb.inc();
        }
    }

    if parts.is_empty() {
        return Err(AirliftError::ArchiveEmpty {
            count: skipped.len(),
        });
    }

    combine_parts(&parts, &options.output)?;

    if !options.keep_parts {
        for part in &parts {
            // Best effort; a leftover part does not invalidate the archive
            let _ = std::fs::remove_file(part);
        }
    }

    Ok(ArchiveSummary {
        archive: options.output.clone(),
        saved,
        skipped,
    })
}

/// Pull if absent, then save one image to its part tarball
fn save_part(
    runtime_client: &dyn ContainerRuntime,
    reference: &str,
    parts_dir: &Path,
    save_delay: Duration,
) -> Result<PathBuf> {
    runtime::ensure_present(runtime_client, reference)?;
    let part = parts_dir.join(tar_part_name(reference));
    runtime::save_with_retry_delay(runtime_client, reference, &part, save_delay)?;
    Ok(part)
}

/// Concatenate part tarballs into one gzip-compressed archive
pub fn combine_parts(parts: &[PathBuf], output: &Path) -> Result<()> {
    let file = File::create(output).map_err(|e| AirliftError::ArchiveFailed {
        path: output.to_path_buf(),
        reason: e.to_string(),
    })?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = Builder::new(encoder);

    for part in parts {
        let name = part
            .file_name()
            .ok_or_else(|| AirliftError::ArchiveFailed {
                path: output.to_path_buf(),
                reason: format!("part '{}' has no filename", part.display()),
            })?;
        builder
            .append_path_with_name(part, name)
            .map_err(|e| AirliftError::ArchiveFailed {
                path: output.to_path_buf(),
                reason: format!("failed to append '{}': {e}", part.display()),
            })?;
    }

    let encoder = builder
        .into_inner()
        .map_err(|e| AirliftError::ArchiveFailed {
            path: output.to_path_buf(),
            reason: e.to_string(),
        })?;
    encoder.finish().map_err(|e| AirliftError::ArchiveFailed {
        path: output.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn parts_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
