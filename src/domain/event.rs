//! Event context and resolution result types

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::naming::fetch_depth;

/// GitHub repository identifier (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s
            .split_once('/')
            .with_context(|| format!("Invalid repository: {s}. Expected owner/name"))?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            anyhow::bail!("Invalid repository: {s}. Expected owner/name");
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Pull request state as reported by GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PrState {
    Open,
    Closed,
    Merged,
}

impl PrState {
    /// Map the REST API shape (`state` plus `merged`) to a state
    #[must_use]
    pub fn from_rest(state: &str, merged: bool) -> Self {
        if merged {
            Self::Merged
        } else if state.eq_ignore_ascii_case("closed") {
            Self::Closed
        } else {
            Self::Open
        }
    }
}

/// What kind of entity triggered the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Pr,
    Issue,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pr => "pr",
            Self::Issue => "issue",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything known about the triggering event
#[derive(Debug, Clone)]
pub struct EventContext {
    pub repo: RepoSlug,
    pub entity_number: u32,
    pub is_pr: bool,
    pub pr_state: Option<PrState>,
    pub head_ref: Option<String>,
    pub base_ref: Option<String>,
    pub commit_count: u32,
    /// Caller-supplied branch to base new work on
    pub base_branch: Option<String>,
    pub branch_prefix: String,
    pub use_commit_signing: bool,
}

impl EventContext {
    /// A PR counts as open unless it is known to be closed or merged
    #[must_use]
    pub const fn is_open_pr(&self) -> bool {
        self.is_pr && !matches!(self.pr_state, Some(PrState::Closed | PrState::Merged))
    }

    #[must_use]
    pub const fn entity_kind(&self) -> EntityKind {
        if self.is_pr {
            EntityKind::Pr
        } else {
            EntityKind::Issue
        }
    }
}

/// Which checkout strategy applies to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Check out the PR head branch
    OpenPr {
        head_ref: &'a str,
        base_ref: &'a str,
        fetch_depth: u32,
    },
    /// Create a fresh branch for an issue or a closed/merged PR
    NewBranch { kind: EntityKind },
}

impl<'a> Resolution<'a> {
    /// Pick the resolution state for an event
    ///
    /// # Errors
    /// Returns an error if an open PR is missing its head or base ref.
    pub fn from_context(ctx: &'a EventContext) -> Result<Self> {
        if !ctx.is_open_pr() {
            return Ok(Self::NewBranch {
                kind: ctx.entity_kind(),
            });
        }

        let head_ref = ctx
            .head_ref
            .as_deref()
            .with_context(|| format!("PR #{} has no head ref", ctx.entity_number))?;
        let base_ref = ctx
            .base_ref
            .as_deref()
            .with_context(|| format!("PR #{} has no base ref", ctx.entity_number))?;

        Ok(Self::OpenPr {
            head_ref,
            base_ref,
            fetch_depth: fetch_depth(ctx.commit_count),
        })
    }
}

/// Final checkout state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchInfo {
    pub base_branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claude_branch: Option<String>,
    pub current_branch: String,
}
