//! Shared fixtures for unit tests.
//!
//! Discovery and cache tests all need real git repositories to clone from,
//! so the repo-building boilerplate lives here: create a directory, write
//! files, commit them, hand back the sha.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create a temp directory outside the current working directory
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Initialize a git repo at `path` with `files` committed, returning the
/// commit sha.
pub fn commit_fixture_repo(path: &Path, files: &[(&str, &str)]) -> String {
    let repo = git2::Repository::init(path).expect("Failed to init fixture repo");

    for (rel, content) in files {
        let full = path.join(rel);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        std::fs::write(&full, content).expect("Failed to write fixture file");
    }

    let sig = git2::Signature::now("Fixture", "fixture@test.invalid")
        .expect("Failed to create signature");
    let tree_id = {
        let mut index = repo.index().expect("Failed to open index");
        for (rel, _) in files {
            index
                .add_path(Path::new(rel))
                .expect("Failed to stage fixture file");
        }
        index.write().expect("Failed to write index");
        index.write_tree().expect("Failed to write tree")
    };
    let oid = {
        let tree = repo.find_tree(tree_id).expect("Failed to find tree");
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .expect("Failed to commit fixture")
    };
    oid.to_string()
}

/// A repo whose images come from its own listing script
pub fn create_direct_repo(base: &Path, name: &str, images: &[&str]) -> PathBuf {
    let path = base.join(name);
    std::fs::create_dir_all(&path).expect("Failed to create repo directory");
    let mut script = String::from("#!/bin/bash\n");
    for image in images {
        script.push_str(&format!("echo '{image}'\n"));
    }
    commit_fixture_repo(&path, &[("tools/get-images.sh", &script)]);
    path
}

/// A dependency repo declaring its images as charm metadata resources
pub fn create_dependency_repo(base: &Path, name: &str, images: &[&str]) -> PathBuf {
    let path = base.join(name);
    std::fs::create_dir_all(&path).expect("Failed to create repo directory");
    let mut metadata = String::from("name: fixture-charm\nresources:\n");
    for (i, image) in images.iter().enumerate() {
        metadata.push_str(&format!(
            "  image-{i}:\n    type: oci-image\n    upstream-source: {image}\n"
        ));
    }
    commit_fixture_repo(&path, &[("metadata.yaml", &metadata)]);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_fixture_repo_produces_a_sha() {
        let temp = create_temp_dir();
        let sha = commit_fixture_repo(temp.path(), &[("README.md", "fixture")]);
        assert_eq!(sha.len(), 40);
        assert!(temp.path().join(".git").exists());
        assert!(temp.path().join("README.md").exists());
    }

    #[test]
    fn test_create_direct_repo_writes_script() {
        let temp = create_temp_dir();
        let path = create_direct_repo(temp.path(), "app-repo", &["a:1", "b:2"]);
        let script = std::fs::read_to_string(path.join("tools/get-images.sh")).unwrap();
        assert!(script.contains("echo 'a:1'"));
        assert!(script.contains("echo 'b:2'"));
    }

    #[test]
    fn test_create_dependency_repo_writes_metadata() {
        let temp = create_temp_dir();
        let path = create_dependency_repo(temp.path(), "dep-repo", &["quay.io/x:1"]);
        let metadata = std::fs::read_to_string(path.join("metadata.yaml")).unwrap();
        assert!(metadata.contains("type: oci-image"));
        assert!(metadata.contains("upstream-source: quay.io/x:1"));
    }
}
