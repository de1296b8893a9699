//! Git reference resolution
//!
//! Resolves branches, tags, and partial SHAs to exact commit SHAs, either
//! against an open repository or via `git ls-remote` without cloning (used
//! by the clone cache to detect unchanged branches).

use std::path::Path;
use std::process::Command;

use git2::Repository;

use crate::error::{AirliftError, Result};

fn is_local_url(url: &str) -> bool {
    url.starts_with("file://") || url.starts_with('/') || Path::new(url).is_absolute()
}

fn parse_sha_from_output(stdout: &str, git_ref: &str) -> Result<String> {
    let line = stdout
        .lines()
        .next()
        .ok_or_else(|| AirliftError::GitRefResolveFailed {
            git_ref: git_ref.to_string(),
            reason: "git ls-remote returned no output".to_string(),
        })?;

    let sha = line
        .split_whitespace()
        .next()
        .ok_or_else(|| AirliftError::GitRefResolveFailed {
            git_ref: git_ref.to_string(),
            reason: "could not parse ls-remote output".to_string(),
        })?;

    if sha.len() != 40 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AirliftError::GitRefResolveFailed {
            git_ref: git_ref.to_string(),
            reason: format!("invalid SHA from ls-remote: {sha}"),
        });
    }

    Ok(sha.to_string())
}

/// Resolve a ref to SHA via `git ls-remote` without cloning.
///
/// Used to check the clone cache before cloning. For local URLs or when the
/// git CLI is unavailable, returns an error (caller falls back to clone).
/// Ref defaults to "HEAD" when None.
pub fn ls_remote(url: &str, git_ref: Option<&str>) -> Result<String> {
    if is_local_url(url) {
        return Err(AirliftError::GitRefResolveFailed {
            git_ref: git_ref.unwrap_or("HEAD").to_string(),
            reason: "ls-remote not used for local URLs".to_string(),
        });
    }

    let ref_arg = git_ref.unwrap_or("HEAD");
    let output = Command::new("git")
        .args(["ls-remote", "--exit-code", url, ref_arg])
        .output()
        .map_err(|e| AirliftError::GitRefResolveFailed {
            git_ref: ref_arg.to_string(),
            reason: format!("git ls-remote failed: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AirliftError::GitRefResolveFailed {
            git_ref: ref_arg.to_string(),
            reason: stderr.trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_sha_from_output(&stdout, ref_arg)
}

/// Resolve a git ref (branch, tag, or partial SHA) to a full SHA
///
/// If no ref is provided, defaults to HEAD.
pub fn resolve_ref(repo: &Repository, git_ref: Option<&str>) -> Result<String> {
    let commit = match git_ref {
        Some(r) => resolve_reference(repo, r)?,
        None => repo
            .head()
            .map_err(|e| AirliftError::GitRefResolveFailed {
                git_ref: "HEAD".to_string(),
                reason: e.message().to_string(),
            })?
            .peel_to_commit()
            .map_err(|e| AirliftError::GitRefResolveFailed {
                git_ref: "HEAD".to_string(),
                reason: e.message().to_string(),
            })?,
    };

    Ok(commit.id().to_string())
}

/// Resolve a reference name to a commit, trying common ref namespaces
fn resolve_reference<'a>(repo: &'a Repository, refname: &str) -> Result<git2::Commit<'a>> {
    let ref_candidates = [
        refname.to_string(),
        format!("refs/heads/{refname}"),
        format!("refs/tags/{refname}"),
        format!("refs/remotes/origin/{refname}"),
    ];

    for candidate in &ref_candidates {
        if let Ok(reference) = repo.find_reference(candidate) {
            if let Ok(commit) = reference.peel_to_commit() {
                return Ok(commit);
            }
        }
    }

    if let Ok(oid) = git2::Oid::from_str(refname) {
        if let Ok(commit) = repo.find_commit(oid) {
            return Ok(commit);
        }
    }

    if let Ok(obj) = repo.revparse_single(refname) {
        if let Ok(commit) = obj.peel_to_commit() {
            return Ok(commit);
        }
    }

    Err(AirliftError::GitRefResolveFailed {
        git_ref: refname.to_string(),
        reason: "Could not resolve reference".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo_with_commit(temp: &TempDir) -> (Repository, git2::Oid) {
        let repo = Repository::init(temp.path()).unwrap();
        let sig = git2::Signature::now("Test", "test@test.com").unwrap();
        let tree_id = {
            let mut index = repo.index().unwrap();
            index.write_tree().unwrap()
        };
        let oid = {
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .unwrap()
        };
        (repo, oid)
    }

    #[test]
    fn test_resolve_ref_head() {
        let temp = TempDir::new().unwrap();
        let (repo, oid) = init_repo_with_commit(&temp);

        let sha = resolve_ref(&repo, None).unwrap();
        assert_eq!(sha, oid.to_string());
        assert_eq!(sha.len(), 40);
    }

    #[test]
    fn test_resolve_ref_by_branch_name() {
        let temp = TempDir::new().unwrap();
        let (repo, oid) = init_repo_with_commit(&temp);

        let sha = resolve_ref(&repo, Some("master")).or_else(|_| resolve_ref(&repo, Some("main")));
        if let Ok(sha) = sha {
            assert_eq!(sha, oid.to_string());
        }
    }

    #[test]
    fn test_resolve_ref_by_full_sha() {
        let temp = TempDir::new().unwrap();
        let (repo, oid) = init_repo_with_commit(&temp);

        let sha = resolve_ref(&repo, Some(&oid.to_string())).unwrap();
        assert_eq!(sha, oid.to_string());
    }

    #[test]
    fn test_resolve_ref_invalid() {
        let temp = TempDir::new().unwrap();
        let (repo, _) = init_repo_with_commit(&temp);

        assert!(resolve_ref(&repo, Some("nonexistent-branch")).is_err());
    }

    #[test]
    fn test_ls_remote_rejects_local_urls() {
        let result = ls_remote("/tmp/some/repo", Some("main"));
        assert!(matches!(
            result,
            Err(AirliftError::GitRefResolveFailed { .. })
        ));
    }

    #[test]
    fn test_parse_sha_from_output() {
        let sha = "a".repeat(40);
        let output = format!("{sha}\trefs/heads/main\n");
        assert_eq!(parse_sha_from_output(&output, "main").unwrap(), sha);
    }

    #[test]
    fn test_parse_sha_rejects_garbage() {
        assert!(parse_sha_from_output("", "main").is_err());
        assert!(parse_sha_from_output("notasha\trefs/heads/main\n", "main").is_err());
    }
}
