#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// Remote every fetch goes through
pub const REMOTE: &str = "origin";

/// Git client interface for branch preparation
///
/// Callers are expected to validate every branch name before passing it in.
pub trait GitClient {
    /// Fetch `refs/pull/{number}/head` from origin
    fn fetch_pull_head(&self, number: u32, depth: u32) -> Result<()>;

    /// Create or reset a local branch at `FETCH_HEAD` and check it out
    fn checkout_reset(&self, branch: &str) -> Result<()>;

    /// Fetch a single branch from origin
    fn fetch_branch(&self, branch: &str, depth: u32) -> Result<()>;

    /// Check out an existing branch
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Create a new branch from HEAD and check it out
    fn create_branch(&self, branch: &str) -> Result<()>;
}

/// Real git implementation bound to one working copy
#[derive(Debug, Clone)]
pub struct RealGitClient {
    workdir: PathBuf,
}

impl RealGitClient {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        let subcommand = args.first().copied().unwrap_or_default();
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("Failed to execute git {subcommand}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }

        Ok(())
    }
}

impl GitClient for RealGitClient {
    fn fetch_pull_head(&self, number: u32, depth: u32) -> Result<()> {
        self.run(&[
            "fetch",
            REMOTE,
            &format!("--depth={depth}"),
            &format!("refs/pull/{number}/head"),
        ])
    }

    fn checkout_reset(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", "-B", branch, "FETCH_HEAD"])
    }

    fn fetch_branch(&self, branch: &str, depth: u32) -> Result<()> {
        self.run(&["fetch", REMOTE, branch, &format!("--depth={depth}")])
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch, "--"])
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", "-b", branch])
    }
}
