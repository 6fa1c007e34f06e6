#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::domain::event::PrState;

/// Fields of a GitHub Actions event payload relevant to branch resolution
///
/// Every field is optional: an `issues` event has no refs, an `issue_comment`
/// on a PR only says that the issue is a PR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPayload {
    pub repository: Option<String>,
    pub number: Option<u32>,
    pub is_pr: bool,
    pub pr_state: Option<PrState>,
    pub head_ref: Option<String>,
    pub base_ref: Option<String>,
    pub commits: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    repository: Option<RawRepository>,
    pull_request: Option<RawPullRequest>,
    issue: Option<RawIssue>,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct RawRef {
    #[serde(rename = "ref")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: u32,
    state: String,
    #[serde(default)]
    merged: bool,
    head: Option<RawRef>,
    base: Option<RawRef>,
    commits: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u32,
    /// Present (with URLs) only when the issue is a pull request
    pull_request: Option<serde_json::Value>,
}

impl EventPayload {
    /// Parse an event payload from JSON
    pub fn parse(json: &str) -> Result<Self> {
        let raw: RawEvent =
            serde_json::from_str(json).context("Failed to parse event payload JSON")?;

        let repository = raw.repository.map(|r| r.full_name);

        if let Some(pr) = raw.pull_request {
            return Ok(Self {
                repository,
                number: Some(pr.number),
                is_pr: true,
                pr_state: Some(PrState::from_rest(&pr.state, pr.merged)),
                head_ref: pr.head.map(|r| r.name),
                base_ref: pr.base.map(|r| r.name),
                commits: pr.commits,
            });
        }

        if let Some(issue) = raw.issue {
            return Ok(Self {
                repository,
                number: Some(issue.number),
                is_pr: issue.pull_request.is_some(),
                ..Self::default()
            });
        }

        Ok(Self {
            repository,
            ..Self::default()
        })
    }

    /// Read and parse the event payload file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event payload: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid event payload: {}", path.display()))
    }
}
