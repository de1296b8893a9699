//! Common test utilities for airlift integration tests
//!
//! Every suite drives the real binary against a throwaway workspace: local
//! git repositories stand in for the GitHub org, and a stub shell script
//! stands in for the container runtime, logging each invocation so tests
//! can assert on the exact pull/tag/push/save sequence.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A test workspace for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Isolated cache directory for this workspace (pass as AIRLIFT_CACHE_DIR)
    pub fn cache_path(&self) -> PathBuf {
        self.path.join("cache")
    }

    /// Directory of fixture repositories, used as --github-base
    pub fn github_base(&self) -> String {
        self.path.join("repos").display().to_string()
    }

    /// Write a bundle manifest into the workspace root
    pub fn write_bundle(&self, yaml: &str) -> PathBuf {
        self.write_file("bundle.yaml", yaml);
        self.path.join("bundle.yaml")
    }

    /// A fixture repo whose images come from its own listing script
    pub fn create_direct_repo(&self, name: &str, images: &[&str]) -> PathBuf {
        let path = self.path.join("repos").join(name);
        std::fs::create_dir_all(&path).expect("Failed to create repo directory");
        let mut script = String::from("#!/bin/bash\n");
        for image in images {
            script.push_str(&format!("echo '{image}'\n"));
        }
        commit_fixture_repo(&path, &[("tools/get-images.sh", &script)]);
        path
    }

    /// A fixture dependency repo declaring images as charm metadata resources
    pub fn create_dependency_repo(&self, name: &str, images: &[&str]) -> PathBuf {
        let path = self.path.join("repos").join(name);
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

    /// A stub runtime where no image is local and every operation succeeds
    pub fn write_stub_runtime(&self) -> PathBuf {
        self.install_runtime_script(
            r#"image) exit 1 ;;
pull|tag|push) exit 0 ;;
save) echo 'stub image data' > "$3"; exit 0 ;;"#,
        )
    }

    /// A stub runtime that reports every image as already present locally
    pub fn write_stub_runtime_all_present(&self) -> PathBuf {
        self.install_runtime_script(
            r#"image) exit 0 ;;
pull|tag|push) exit 0 ;;
save) echo 'stub image data' > "$3"; exit 0 ;;"#,
        )
    }

    /// A stub runtime where pulling any reference containing `bad` fails
    pub fn write_stub_runtime_failing_pull(&self) -> PathBuf {
        self.install_runtime_script(
            r#"image) exit 1 ;;
pull)
  case "$2" in
    *bad*) echo "manifest unknown: $2" >&2; exit 1 ;;
    *) exit 0 ;;
  esac ;;
tag|push) exit 0 ;;
save) echo 'stub image data' > "$3"; exit 0 ;;"#,
        )
    }

    /// A stub runtime where saving any reference containing `bad` fails
    pub fn write_stub_runtime_failing_save(&self) -> PathBuf {
        self.install_runtime_script(
            r#"image) exit 1 ;;
pull|tag|push) exit 0 ;;
save)
  case "$4" in
    *bad*) echo "write error: $4" >&2; exit 1 ;;
    *) echo 'stub image data' > "$3"; exit 0 ;;
  esac ;;"#,
        )
    }

    /// Invocation log written by the stub runtime, one line per call
    pub fn runtime_log(&self) -> String {
        let log = self.path.join("runtime.log");
        std::fs::read_to_string(&log).unwrap_or_default()
    }

    /// Count log lines starting with `prefix`
    pub fn runtime_calls(&self, prefix: &str) -> usize {
        self.runtime_log()
            .lines()
            .filter(|line| line.starts_with(prefix))
            .count()
    }

    fn install_runtime_script(&self, dispatch: &str) -> PathBuf {
        let log = self.path.join("runtime.log");
        let script = format!(
            r#"#!/bin/sh
echo "$@" >> "{log}"
case "$1" in
version) exit 0 ;;
{dispatch}
*) exit 0 ;;
esac
"#,
            log = log.display()
        );

        let path = self.path.join("stub-runtime");
        std::fs::write(&path, script).expect("Failed to write stub runtime");
        let mut perms = std::fs::metadata(&path)
            .expect("Failed to stat stub runtime")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to chmod stub runtime");
        path
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize a git repo at `path` with `files` committed
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("test/file.txt", "hello");
        assert!(workspace.file_exists("test/file.txt"));
        assert_eq!(workspace.read_file("test/file.txt"), "hello");
    }

    #[test]
    fn test_workspace_fixture_repos() {
        let workspace = TestWorkspace::new();
        workspace.create_direct_repo("app-repo", &["a:1"]);
        workspace.create_dependency_repo("dep-repo", &["b:2"]);

        assert!(workspace.file_exists("repos/app-repo/tools/get-images.sh"));
        assert!(workspace.file_exists("repos/dep-repo/metadata.yaml"));
    }

    #[test]
    fn test_stub_runtime_logs_invocations() {
        let workspace = TestWorkspace::new();
        let stub = workspace.write_stub_runtime();

        let status = std::process::Command::new(&stub)
            .args(["pull", "ubuntu:22.04"])
            .status()
            .expect("Failed to run stub");
        assert!(status.success());
        assert_eq!(workspace.runtime_calls("pull ubuntu:22.04"), 1);
    }
}
