//! Bundle manifest (bundle.yaml) parsing and validation
//!
//! A bundle maps application names to charm deployment entries. The airgap
//! pipeline only cares about each entry's discovery annotations; validation
//! enforces up front that every application either carries them or is
//! explicitly excluded, so a bad manifest fails before any network call.

pub mod application;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AirliftError, Result};

pub use application::{Application, DiscoverySource};

/// Bundle manifest contents
///
/// Everything except `applications` (series, relations, ...) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bundle {
    /// Application name -> entry, ordered for deterministic iteration
    #[serde(default)]
    pub applications: BTreeMap<String, Application>,
}

impl Bundle {
    /// Parse a bundle from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let bundle: Self = serde_yaml::from_str(yaml)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Load and validate a bundle manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AirliftError::BundleReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let bundle: Self =
            serde_yaml::from_str(&content).map_err(|e| AirliftError::BundleParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Check every application has a discovery source or the exclusion marker
    pub fn validate(&self) -> Result<()> {
        if self.applications.is_empty() {
            return Err(AirliftError::BundleValidationFailed {
                message: "bundle declares no applications".to_string(),
            });
        }
        for (name, app) in &self.applications {
            app.discovery_source(name)?;
        }
        Ok(())
    }

    /// Applications that take part in discovery, with their sources
    ///
    /// Excluded entries are filtered out. Only call after `validate`
    /// (load/from_yaml already did), so the per-entry lookup cannot fail.
    pub fn discovery_targets(&self) -> Result<Vec<(String, DiscoverySource)>> {
        let mut targets = Vec::new();
        for (name, app) in &self.applications {
            match app.discovery_source(name)? {
                DiscoverySource::Excluded => {}
                source => targets.push((name.clone(), source)),
            }
        }
        Ok(targets)
    }
}
