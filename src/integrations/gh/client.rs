#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::process::Command;

use crate::domain::event::{PrState, RepoSlug};

/// Repository metadata needed for branch resolution
#[derive(Debug, Clone, Deserialize)]
pub struct RepoInfo {
    pub default_branch: String,
}

/// Information about a GitHub pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrInfo {
    pub state: PrState,
    pub head_ref: String,
    pub base_ref: String,
    pub commits: u32,
}

#[derive(Debug, Deserialize)]
struct RestRef {
    #[serde(rename = "ref")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RestPull {
    state: String,
    #[serde(default)]
    merged: bool,
    head: RestRef,
    base: RestRef,
    #[serde(default)]
    commits: u32,
}

impl From<RestPull> for PrInfo {
    fn from(pull: RestPull) -> Self {
        Self {
            state: PrState::from_rest(&pull.state, pull.merged),
            head_ref: pull.head.name,
            base_ref: pull.base.name,
            commits: pull.commits,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RestObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RestGitRef {
    object: RestObject,
}

/// Trait for reading repository metadata from GitHub
pub trait GhClient {
    /// Get repository information (default branch)
    fn repo_info(&self, repo: &RepoSlug) -> Result<RepoInfo>;

    /// Get the commit SHA a ref such as `heads/main` points at
    ///
    /// Fails when the ref does not exist.
    fn ref_sha(&self, repo: &RepoSlug, git_ref: &str) -> Result<String>;

    /// Get information about a pull request
    fn pr_info(&self, repo: &RepoSlug, number: u32) -> Result<PrInfo>;

    /// Check if gh CLI is available
    fn is_available(&self) -> bool;
}

/// Real implementation of `GhClient` using `gh api`
pub struct RealGhClient;

impl RealGhClient {
    fn api<T: DeserializeOwned>(endpoint: &str) -> Result<T> {
        let output = Command::new("gh")
            .args(["api", endpoint])
            .output()
            .context("Failed to execute gh command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("gh api {endpoint} failed: {}", stderr.trim());
        }

        let json = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse gh api {endpoint} response: {json}"))
    }
}

impl GhClient for RealGhClient {
    fn repo_info(&self, repo: &RepoSlug) -> Result<RepoInfo> {
        Self::api(&format!("repos/{repo}"))
    }

    fn ref_sha(&self, repo: &RepoSlug, git_ref: &str) -> Result<String> {
        let git_ref: RestGitRef = Self::api(&format!("repos/{repo}/git/ref/{git_ref}"))?;
        Ok(git_ref.object.sha)
    }

    fn pr_info(&self, repo: &RepoSlug, number: u32) -> Result<PrInfo> {
        let pull: RestPull = Self::api(&format!("repos/{repo}/pulls/{number}"))?;
        Ok(pull.into())
    }

    fn is_available(&self) -> bool {
        Command::new("gh")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Clone)]
    enum MockResult<T> {
        Ok(T),
        Err(String),
    }

    /// Mock implementation for testing
    pub struct MockGhClient {
        default_branch: Option<MockResult<String>>,
        refs: HashMap<String, String>,
        pr_result: Option<MockResult<PrInfo>>,
        available: bool,
        requests: RefCell<Vec<String>>,
    }

    impl MockGhClient {
        pub fn new() -> Self {
            Self {
                default_branch: None,
                refs: HashMap::new(),
                pr_result: None,
                available: true,
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn with_default_branch(mut self, branch: &str) -> Self {
            self.default_branch = Some(MockResult::Ok(branch.to_string()));
            self
        }

        pub fn with_repo_error(mut self, error: &str) -> Self {
            self.default_branch = Some(MockResult::Err(error.to_string()));
            self
        }

        /// Register `heads/{branch}` as existing
        pub fn with_branch(mut self, branch: &str) -> Self {
            self.refs
                .insert(format!("heads/{branch}"), format!("sha-of-{branch}"));
            self
        }

        pub fn with_pr(mut self, pr: PrInfo) -> Self {
            self.pr_result = Some(MockResult::Ok(pr));
            self
        }

        pub fn with_pr_error(mut self, error: &str) -> Self {
            self.pr_result = Some(MockResult::Err(error.to_string()));
            self
        }

        pub fn unavailable(mut self) -> Self {
            self.available = false;
            self
        }

        /// Endpoints queried so far, in order
        pub fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    impl GhClient for MockGhClient {
        fn repo_info(&self, repo: &RepoSlug) -> Result<RepoInfo> {
            self.requests.borrow_mut().push(format!("repos/{repo}"));
            match &self.default_branch {
                Some(MockResult::Ok(branch)) => Ok(RepoInfo {
                    default_branch: branch.clone(),
                }),
                Some(MockResult::Err(msg)) => Err(anyhow::anyhow!("{msg}")),
                None => Err(anyhow::anyhow!("No repo result configured")),
            }
        }

        fn ref_sha(&self, repo: &RepoSlug, git_ref: &str) -> Result<String> {
            self.requests
                .borrow_mut()
                .push(format!("repos/{repo}/git/ref/{git_ref}"));
            self.refs
                .get(git_ref)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Not Found (HTTP 404)"))
        }

        fn pr_info(&self, repo: &RepoSlug, number: u32) -> Result<PrInfo> {
            self.requests
                .borrow_mut()
                .push(format!("repos/{repo}/pulls/{number}"));
            match &self.pr_result {
                Some(MockResult::Ok(info)) => Ok(info.clone()),
                Some(MockResult::Err(msg)) => Err(anyhow::anyhow!("{msg}")),
                None => Err(anyhow::anyhow!("No PR result configured")),
            }
        }

        fn is_available(&self) -> bool {
            self.available
        }
    }

    #[test]
    fn test_rest_pull_open() {
        let json = r#"{
            "number": 42,
            "state": "open",
            "merged": false,
            "commits": 3,
            "head": {"ref": "feature/x", "sha": "abc"},
            "base": {"ref": "main", "sha": "def"}
        }"#;
        let pull: RestPull = serde_json::from_str(json).unwrap();
        assert_eq!(
            PrInfo::from(pull),
            PrInfo {
                state: PrState::Open,
                head_ref: "feature/x".to_string(),
                base_ref: "main".to_string(),
                commits: 3,
            }
        );
    }

    #[test]
    fn test_rest_pull_merged() {
        let json = r#"{
            "state": "closed",
            "merged": true,
            "head": {"ref": "feature/x"},
            "base": {"ref": "main"}
        }"#;
        let pull: RestPull = serde_json::from_str(json).unwrap();
        let info = PrInfo::from(pull);
        assert_eq!(info.state, PrState::Merged);
        assert_eq!(info.commits, 0);
    }

    #[test]
    fn test_rest_repo_and_ref() {
        let repo: RepoInfo =
            serde_json::from_str(r#"{"full_name": "octo/widgets", "default_branch": "trunk"}"#)
                .unwrap();
        assert_eq!(repo.default_branch, "trunk");

        let git_ref: RestGitRef = serde_json::from_str(
            r#"{"ref": "refs/heads/main", "object": {"sha": "0123abcd", "type": "commit"}}"#,
        )
        .unwrap();
        assert_eq!(git_ref.object.sha, "0123abcd");
    }

    #[test]
    fn test_mock_client_records_requests() {
        let repo: RepoSlug = "octo/widgets".parse().unwrap();
        let client = MockGhClient::new()
            .with_default_branch("trunk")
            .with_branch("trunk");

        assert_eq!(client.repo_info(&repo).unwrap().default_branch, "trunk");
        assert_eq!(client.ref_sha(&repo, "heads/trunk").unwrap(), "sha-of-trunk");
        assert!(client.ref_sha(&repo, "heads/missing").is_err());
        assert_eq!(
            client.requests(),
            vec![
                "repos/octo/widgets",
                "repos/octo/widgets/git/ref/heads/trunk",
                "repos/octo/widgets/git/ref/heads/missing",
            ]
        );
    }

    #[test]
    fn test_mock_client_unavailable() {
        let client = MockGhClient::new().unavailable();
        assert!(!client.is_available());
    }
}
