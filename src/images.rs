//! Deduplicated, sorted image reference collections
//!
//! The `ImageSet` is the unit of work for every downstream step: pull, retag,
//! push, save. Backed by a `BTreeSet` so order and uniqueness hold by
//! construction. Flat-file I/O matches the newline-separated `*.txt` lists
//! the pipeline exchanges between invocations.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{AirliftError, Result};

/// A deduplicated, lexicographically sorted set of image reference strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    images: BTreeSet<String>,
}

impl ImageSet {
    /// Create an empty image set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one image reference, ignoring blank input
    ///
    /// Returns true if the reference was not already present.
    pub fn insert(&mut self, reference: impl AsRef<str>) -> bool {
        let reference = reference.as_ref().trim();
        if reference.is_empty() {
            return false;
        }
        self.images.insert(reference.to_string())
    }

    /// Merge every reference from an iterator, filtering blanks
    pub fn extend<I, S>(&mut self, references: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for reference in references {
            self.insert(reference);
        }
    }

    /// Merge another set into this one
    pub fn merge(&mut self, other: ImageSet) {
        self.images.extend(other.images);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.images.contains(reference)
    }

    /// Iterate references in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(String::as_str)
    }

    /// Load a newline-separated image list, skipping blank lines
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AirliftError::FileReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_lines(&content))
    }

    /// Build a set from newline-separated text
    pub fn from_lines(content: &str) -> Self {
        let mut set = Self::new();
        set.extend(content.lines());
        set
    }

    /// Write the set as a newline-separated list with a trailing newline
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut content = self.images.iter().cloned().collect::<Vec<_>>().join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        std::fs::write(path, content).map_err(|e| AirliftError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl<'a> IntoIterator for &'a ImageSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

impl FromIterator<String> for ImageSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
