//! Cache command integration tests
//!
//! Each test points AIRLIFT_CACHE_DIR at a workspace-local directory, so
//! the user's real cache is never touched and tests stay independent.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
fn airlift_cmd() -> Command {
    Command::cargo_bin("airlift").unwrap()
}

/// The slug a local fixture repo gets in the cache
fn slug_for(workspace: &common::TestWorkspace, repo: &str) -> String {
    format!("{}/{}", workspace.github_base(), repo)
        .replace([':', '/'], "-")
        .trim_matches('-')
        .to_string()
}

/// Resolve the workspace bundle once so the cache has content
fn populate_cache(workspace: &common::TestWorkspace) {
    airlift_cmd()
        .current_dir(&workspace.path)
        .env("AIRLIFT_CACHE_DIR", workspace.cache_path())
        .args([
            "resolve",
            "bundle.yaml",
            "--github-base",
            &workspace.github_base(),
        ])
        .assert()
        .success();
}

#[test]
fn test_cache_stats_empty() {
    let workspace = common::TestWorkspace::new();

    airlift_cmd()
        .current_dir(&workspace.path)
        .env("AIRLIFT_CACHE_DIR", workspace.cache_path())
        .arg("cache")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache Statistics:"))
        .stdout(predicate::str::contains("Repositories: 0"))
        .stdout(predicate::str::contains("Cache is empty."));
}

#[test]
fn test_cache_stats_after_resolve() {
    let workspace = common::TestWorkspace::new();
    workspace.create_direct_repo("app-repo", &["app/frontend:2.1"]);
    workspace.write_bundle(
        r#"applications:
  app:
    charm: app
    _github_repo_name: app-repo
"#,
    );
    populate_cache(&workspace);

    airlift_cmd()
        .current_dir(&workspace.path)
        .env("AIRLIFT_CACHE_DIR", workspace.cache_path())
        .arg("cache")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repositories: 1"))
        .stdout(predicate::str::contains("Versions: 1"))
        .stdout(predicate::str::contains("airlift cache list"));
}

#[test]
fn test_cache_list_names_repositories() {
    let workspace = common::TestWorkspace::new();
    workspace.create_direct_repo("app-repo", &["app/frontend:2.1"]);
    workspace.write_bundle(
        r#"applications:
  app:
    charm: app
    _github_repo_name: app-repo
"#,
    );
    populate_cache(&workspace);

    airlift_cmd()
        .current_dir(&workspace.path)
        .env("AIRLIFT_CACHE_DIR", workspace.cache_path())
        .args(["cache", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cached repositories (1):"))
        .stdout(predicate::str::contains(slug_for(&workspace, "app-repo")))
        .stdout(predicate::str::contains("(1 version,"));
}

#[test]
fn test_cache_clear_removes_everything() {
    let workspace = common::TestWorkspace::new();
    workspace.create_direct_repo("app-repo", &["app/frontend:2.1"]);
    workspace.write_bundle(
        r#"applications:
  app:
    charm: app
    _github_repo_name: app-repo
"#,
    );
    populate_cache(&workspace);

    airlift_cmd()
        .current_dir(&workspace.path)
        .env("AIRLIFT_CACHE_DIR", workspace.cache_path())
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache cleared successfully."));

    airlift_cmd()
        .current_dir(&workspace.path)
        .env("AIRLIFT_CACHE_DIR", workspace.cache_path())
        .arg("cache")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repositories: 0"));
}

#[test]
fn test_cache_clear_only_removes_one_repository() {
    let workspace = common::TestWorkspace::new();
    workspace.create_direct_repo("app-repo", &["app/frontend:2.1"]);
    workspace.create_direct_repo("other-repo", &["other/backend:1.0"]);
    workspace.write_bundle(
        r#"applications:
  app:
    charm: app
    _github_repo_name: app-repo
  other:
    charm: other
    _github_repo_name: other-repo
"#,
    );
    populate_cache(&workspace);

    let app_slug = slug_for(&workspace, "app-repo");
    airlift_cmd()
        .current_dir(&workspace.path)
        .env("AIRLIFT_CACHE_DIR", workspace.cache_path())
        .args(["cache", "clear", "--only", &app_slug])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed cached repository:"));

    airlift_cmd()
        .current_dir(&workspace.path)
        .env("AIRLIFT_CACHE_DIR", workspace.cache_path())
        .args(["cache", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(slug_for(&workspace, "other-repo")))
        .stdout(predicate::str::contains(app_slug).not());
}

#[test]
fn test_cache_clear_only_unknown_slug() {
    let workspace = common::TestWorkspace::new();

    airlift_cmd()
        .current_dir(&workspace.path)
        .env("AIRLIFT_CACHE_DIR", workspace.cache_path())
        .args(["cache", "clear", "--only", "never-cached"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No cached repository named 'never-cached'",
        ));
}
