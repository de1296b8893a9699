//! Image reference parsing and retagging
//!
//! A deliberate parser for `[registry/]repository[:tag][@digest]` instead of
//! substring registry swaps. The first path segment is treated as a registry
//! only when it contains `.` or `:` or equals `localhost`, matching how the
//! container runtimes themselves disambiguate (`ubuntu:22.04` is a Docker Hub
//! official image, `gcr.io/pause:3.9` is not).

use std::fmt;

use crate::error::{AirliftError, Result};

/// A parsed container image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Registry host (e.g. "gcr.io", "localhost:5000"); None means the
    /// runtime's default registry
    pub registry: Option<String>,
    /// Repository path, possibly nested (e.g. "ml-pipeline/api-server")
    pub repository: String,
    /// Tag (e.g. "2.0.5")
    pub tag: Option<String>,
    /// Digest including the scheme marker (e.g. "sha256:abc...")
    pub digest: Option<String>,
}

/// True if a leading path segment names a registry rather than a namespace
fn is_registry_segment(segment: &str) -> bool {
    segment.contains('.') || segment.contains(':') || segment == "localhost"
}

impl ImageReference {
    /// Parse an image reference string
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AirliftError::InvalidImageReference {
                reference: input.to_string(),
                reason: "empty reference".to_string(),
            });
        }

        let invalid = |reason: &str| AirliftError::InvalidImageReference {
            reference: input.to_string(),
            reason: reason.to_string(),
        };

        // Digest comes after '@' and applies to the whole reference
        let (name_and_tag, digest) = match input.split_once('@') {
            Some((name, digest)) => {
                if digest.is_empty() {
                    return Err(invalid("empty digest"));
                }
                if !digest.contains(':') {
                    return Err(invalid("digest is missing its algorithm prefix"));
                }
                (name, Some(digest.to_string()))
            }
            None => (input, None),
        };

        // A ':' after the last '/' separates the tag; earlier colons belong
        // to the registry host (port numbers)
        let last_slash = name_and_tag.rfind('/');
        let tag_colon = match name_and_tag.rfind(':') {
            Some(pos) if last_slash.is_none_or(|slash| pos > slash) => Some(pos),
            _ => None,
        };
        let (name, tag) = match tag_colon {
            Some(pos) => {
                let tag = &name_and_tag[pos + 1..];
                if tag.is_empty() {
                    return Err(invalid("empty tag"));
                }
                (&name_and_tag[..pos], Some(tag.to_string()))
            }
            None => (name_and_tag, None),
        };

        if name.is_empty() {
            return Err(invalid("empty repository"));
        }
        if name.split('/').any(str::is_empty) {
            return Err(invalid("empty path component"));
        }

        let (registry, repository) = match name.split_once('/') {
            Some((first, rest)) if is_registry_segment(first) => {
                (Some(first.to_string()), rest.to_string())
            }
            _ => (None, name.to_string()),
        };

        Ok(Self {
            registry,
            repository,
            tag,
            digest,
        })
    }

    /// Compute the reference this image gets in the target registry.
    ///
    /// The original registry segment is dropped and the repository path is
    /// kept under `new_registry` (which may itself carry a path, e.g.
    /// "172.16.0.1:5000/mirror"). Digest-qualified references become
    /// tag-qualified: the digest hex is the new tag, since pushed mirrors
    /// get fresh digests and the scheme marker is not valid in a tag.
    pub fn retag(&self, new_registry: &str) -> Result<Self> {
        let prefix = new_registry.trim().trim_matches('/');
        if prefix.is_empty() {
            return Err(AirliftError::InvalidImageReference {
                reference: new_registry.to_string(),
                reason: "empty target registry".to_string(),
            });
        }

        let tag = match (&self.digest, &self.tag) {
            (Some(digest), _) => {
                let hex = digest.rsplit(':').next().unwrap_or(digest);
                Some(hex.to_string())
            }
            (None, Some(tag)) => Some(tag.clone()),
            (None, None) => None,
        };

        let mut retagged = format!("{prefix}/{}", self.repository);
        if let Some(tag) = &tag {
            retagged.push(':');
            retagged.push_str(tag);
        }
        Self::parse(&retagged)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(registry) = &self.registry {
            write!(f, "{registry}/")?;
        }
        write!(f, "{}", self.repository)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}
