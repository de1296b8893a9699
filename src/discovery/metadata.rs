//! Image discovery from charm metadata
//!
//! Dependency repos declare their container images as `oci-image` resources
//! in `metadata.yaml`. A repo may hold several charms (one per subdirectory),
//! so the whole tree is scanned and every declared upstream source collected.

use std::path::Path;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::{AirliftError, Result};
use crate::images::ImageSet;

/// Resource type marking a container image in charm metadata
const OCI_IMAGE_TYPE: &str = "oci-image";

/// Filename carrying charm resource declarations
const METADATA_FILE: &str = "metadata.yaml";

/// The subset of charm `metadata.yaml` this tool cares about
#[derive(Debug, Deserialize)]
struct CharmMetadata {
    #[serde(default)]
    resources: std::collections::BTreeMap<String, ResourceSpec>,
}

#[derive(Debug, Deserialize)]
struct ResourceSpec {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(rename = "upstream-source", default)]
    upstream_source: Option<String>,
}

/// Collect every `oci-image` upstream source declared under `root`.
///
/// Fails with a named error if the repo declares no image resources at all;
/// a dependency repo without images means the bundle metadata points at the
/// wrong repository.
pub fn collect_images(root: &Path, repo: &str) -> Result<ImageSet> {
    let mut images = ImageSet::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !skip_subtree(e))
    {
        let entry = entry.map_err(|e| AirliftError::CacheOperationFailed {
            message: format!("Failed to scan '{}': {e}", root.display()),
        })?;
        if entry.file_type().is_file() && entry.file_name() == METADATA_FILE {
            for image in images_in_metadata_file(entry.path()) {
                images.insert(image);
            }
        }
    }

    if images.is_empty() {
        return Err(AirliftError::NoImageResources {
            repo: repo.to_string(),
        });
    }
    Ok(images)
}

/// Parse one metadata file, returning its `oci-image` upstream sources.
///
/// Files that are not valid YAML mappings are skipped: charm repos carry
/// templated metadata fixtures under test directories that never parse.
fn images_in_metadata_file(path: &Path) -> Vec<String> {
    let Ok(raw) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let Ok(metadata) = serde_yaml::from_str::<CharmMetadata>(&raw) else {
        return Vec::new();
    };

    metadata
        .resources
        .into_values()
        .filter(|resource| resource.kind.as_deref() == Some(OCI_IMAGE_TYPE))
        .filter_map(|resource| resource.upstream_source)
        .collect()
}

/// Prune hidden directories plus test/doc trees, which carry templated or
/// fixture metadata that is not the charm's own
fn skip_subtree(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    name.starts_with('.') || (entry.file_type().is_dir() && matches!(name, "tests" | "docs"))
}
