//! Registry mover: pull, retag, optionally push
//!
//! For each image in a set: make sure it is present locally (pull on miss),
//! compute its name in the target registry, apply the tag, and push when
//! asked. The retagged names come back as a sorted set ready to persist as
//! `retagged-images.txt`.

use crate::error::Result;
use crate::images::ImageSet;
use crate::progress::ProgressDisplay;
use crate::reference::ImageReference;
use crate::runtime::{self, ContainerRuntime};

/// Knobs for a retag run
#[derive(Debug, Clone)]
pub struct MoveOptions {
    /// Target registry prefix, possibly with a path ("172.16.0.1:5000/mirror")
    pub new_registry: String,
    /// Push each retagged image to the target registry
    pub push: bool,
}

impl MoveOptions {
    pub fn new(new_registry: impl Into<String>) -> Self {
        Self {
            new_registry: new_registry.into(),
            push: false,
        }
    }
}

/// What a retag run did
#[derive(Debug, Default)]
pub struct MoveSummary {
    /// The retagged references, sorted and deduplicated
    pub retagged: ImageSet,
    /// Images pulled because they were not in the local store
    pub pulled: usize,
    /// Images pushed to the target registry
    pub pushed: usize,
}

/// Pull, retag, and optionally push every image in the set.
///
/// Stops at the first failure; everything up to that point stays applied in
/// the local image store (tags are idempotent to reapply).
pub fn retag_images(
    runtime_client: &dyn ContainerRuntime,
    images: &ImageSet,
    options: &MoveOptions,
    progress: Option<&ProgressDisplay>,
) -> Result<MoveSummary> {
    let total = images.len();
    let mut summary = MoveSummary::default();

    for (current, reference) in images.iter().enumerate() {
        if let Some(pb) = progress {
            pb.update_image(reference, current + 1, total);
        }

        let target = ImageReference::parse(reference)?
            .retag(&options.new_registry)?
            .to_string();

        if runtime::ensure_present(runtime_client, reference)? {
            summary.pulled += 1;
        }
        runtime_client.tag(reference, &target)?;
        if options.push {
            runtime_client.push(&target)?;
            summary.pushed += 1;
        }
        summary.retagged.insert(target);

        if let Some(pb) = progress {
            pb.inc();
        }
    }

    Ok(summary)
}
