//! A single application entry in a bundle manifest

use serde::Deserialize;

use crate::error::{AirliftError, Result};

/// One `applications.<name>` entry from a bundle YAML.
///
/// Juju-only fields (scale, options, trust, ...) are ignored; only the
/// charm/channel identity and the underscore-prefixed discovery annotations
/// matter here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Application {
    /// Charm reference (carried opaquely, for display only)
    #[serde(default)]
    pub charm: Option<String>,

    /// Charm channel (carried opaquely, for display only)
    #[serde(default)]
    pub channel: Option<String>,

    /// Repo that owns this charm; images come from its discovery script
    #[serde(rename = "_github_repo_name", default)]
    pub github_repo_name: Option<String>,

    /// Branch for the owning repo (defaults to the repo's HEAD)
    #[serde(rename = "_github_repo_branch", default)]
    pub github_repo_branch: Option<String>,

    /// Dependency repo whose charm metadata declares this charm's images
    #[serde(rename = "_github_dependency_repo_name", default)]
    pub github_dependency_repo_name: Option<String>,

    /// Branch for the dependency repo
    #[serde(rename = "_github_dependency_repo_branch", default)]
    pub github_dependency_repo_branch: Option<String>,

    /// Explicitly opt this application out of image discovery
    #[serde(rename = "_airgap_exclude", default)]
    pub airgap_exclude: bool,
}

/// How an application's images are discovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoverySource {
    /// Explicitly excluded from mirroring
    Excluded,
    /// Clone the owning repo and run its image listing script
    Direct { repo: String, branch: Option<String> },
    /// Clone the dependency repo and read charm metadata resources
    Dependency { repo: String, branch: Option<String> },
}

impl Application {
    /// Resolve this entry's discovery source, or fail naming the application.
    ///
    /// Exclusion takes precedence; carrying both direct and dependency keys
    /// is ambiguous and rejected.
    pub fn discovery_source(&self, name: &str) -> Result<DiscoverySource> {
        if self.airgap_exclude {
            return Ok(DiscoverySource::Excluded);
        }

        match (&self.github_repo_name, &self.github_dependency_repo_name) {
            (Some(_), Some(_)) => Err(AirliftError::BundleValidationFailed {
                message: format!(
                    "Application '{name}' carries both '_github_repo_name' and \
                     '_github_dependency_repo_name'"
                ),
            }),
            (Some(repo), None) => Ok(DiscoverySource::Direct {
                repo: repo.clone(),
                branch: self.github_repo_branch.clone(),
            }),
            (None, Some(repo)) => Ok(DiscoverySource::Dependency {
                repo: repo.clone(),
                branch: self.github_dependency_repo_branch.clone(),
            }),
            (None, None) => Err(AirliftError::MissingDiscoveryMetadata {
                application: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_source() {
        let app = Application {
            github_repo_name: Some("training-operator".to_string()),
            github_repo_branch: Some("main".to_string()),
            ..Application::default()
        };
        assert_eq!(
            app.discovery_source("training-operator").unwrap(),
            DiscoverySource::Direct {
                repo: "training-operator".to_string(),
                branch: Some("main".to_string()),
            }
        );
    }

    #[test]
    fn test_dependency_source() {
        let app = Application {
            github_dependency_repo_name: Some("mysql-k8s-operator".to_string()),
            ..Application::default()
        };
        assert_eq!(
            app.discovery_source("mysql-k8s").unwrap(),
            DiscoverySource::Dependency {
                repo: "mysql-k8s-operator".to_string(),
                branch: None,
            }
        );
    }

    #[test]
    fn test_excluded_wins() {
        let app = Application {
            github_repo_name: Some("grafana-agent-k8s".to_string()),
            airgap_exclude: true,
            ..Application::default()
        };
        assert_eq!(
            app.discovery_source("grafana-agent-k8s").unwrap(),
            DiscoverySource::Excluded
        );
    }

    #[test]
    fn test_missing_metadata_names_application() {
        let app = Application::default();
        let err = app.discovery_source("istio-pilot").unwrap_err();
        match err {
            AirliftError::MissingDiscoveryMetadata { application } => {
                assert_eq!(application, "istio-pilot");
            }
            other => panic!("Expected MissingDiscoveryMetadata, got {other:?}"),
        }
    }

    #[test]
    fn test_both_sources_rejected() {
        let app = Application {
            github_repo_name: Some("a".to_string()),
            github_dependency_repo_name: Some("b".to_string()),
            ..Application::default()
        };
        assert!(matches!(
            app.discovery_source("x"),
            Err(AirliftError::BundleValidationFailed { .. })
        ));
    }
}
