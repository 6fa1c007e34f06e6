#![allow(clippy::missing_errors_doc)]
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};

use crate::color;
use crate::domain::branch_name;
use crate::domain::event::{BranchInfo, EntityKind, EventContext, Resolution};
use crate::domain::naming::generate_branch_name;
use crate::integrations::gh::{heads_ref, GhClient};
use crate::integrations::git::GitClient;
use crate::integrations::outputs::{OutputWriter, BASE_BRANCH, CLAUDE_BRANCH};

/// Depth used when fetching the branch new work is based on
const SOURCE_FETCH_DEPTH: u32 = 1;

/// Branch resolver that coordinates git, GitHub metadata and workflow outputs
pub struct BranchResolver<G, M, O>
where
    G: GitClient,
    M: GhClient,
    O: OutputWriter,
{
    git_client: G,
    gh_client: M,
    outputs: O,
    color_mode: color::ColorMode,
}

impl<G, M, O> BranchResolver<G, M, O>
where
    G: GitClient,
    M: GhClient,
    O: OutputWriter,
{
    /// Create a new branch resolver
    pub const fn new(git_client: G, gh_client: M, outputs: O, color_mode: color::ColorMode) -> Self {
        Self {
            git_client,
            gh_client,
            outputs,
            color_mode,
        }
    }

    /// Resolve and check out the branch for an event, using the local clock
    pub fn resolve(&self, ctx: &EventContext) -> Result<BranchInfo> {
        self.resolve_at(ctx, Local::now().naive_local())
    }

    /// Resolve and check out the branch for an event
    ///
    /// `now` only affects the name of a generated branch.
    ///
    /// # Errors
    /// Returns an error if a branch name fails validation, a metadata lookup
    /// fails, or a git command fails. Validation happens before the git
    /// command that would use the name.
    pub fn resolve_at(&self, ctx: &EventContext, now: NaiveDateTime) -> Result<BranchInfo> {
        match Resolution::from_context(ctx)? {
            Resolution::OpenPr {
                head_ref,
                base_ref,
                fetch_depth,
            } => self.checkout_open_pr(ctx.entity_number, head_ref, base_ref, fetch_depth),
            Resolution::NewBranch { kind } => self.create_new_branch(ctx, kind, now),
        }
    }

    fn checkout_open_pr(
        &self,
        number: u32,
        head_ref: &str,
        base_ref: &str,
        fetch_depth: u32,
    ) -> Result<BranchInfo> {
        eprintln!(
            "{}",
            color::info(
                self.color_mode,
                format!("PR #{number} is open, checking out PR branch {head_ref}…")
            )
        );

        branch_name::validate(head_ref)?;
        branch_name::validate(base_ref)?;

        eprintln!(
            "{}",
            color::dim(
                self.color_mode,
                format!("Fetching refs/pull/{number}/head with depth {fetch_depth}")
            )
        );
        // The numbered pull ref lives on origin even when the head branch is on a fork
        self.git_client.fetch_pull_head(number, fetch_depth)?;
        self.git_client.checkout_reset(head_ref)?;

        eprintln!(
            "{}",
            color::success(
                self.color_mode,
                format!("Checked out PR #{number} branch {head_ref}")
            )
        );

        Ok(BranchInfo {
            base_branch: base_ref.to_string(),
            claude_branch: None,
            current_branch: head_ref.to_string(),
        })
    }

    fn create_new_branch(
        &self,
        ctx: &EventContext,
        kind: EntityKind,
        now: NaiveDateTime,
    ) -> Result<BranchInfo> {
        let source_branch = self.source_branch(ctx)?;
        let new_branch = generate_branch_name(&ctx.branch_prefix, kind, ctx.entity_number, now);

        branch_name::validate(&source_branch)?;
        branch_name::validate(&new_branch)?;

        self.ensure_gh_available()?;
        self.gh_client
            .ref_sha(&ctx.repo, &heads_ref(&source_branch))
            .with_context(|| {
                format!(
                    "Source branch {source_branch} does not exist in {}",
                    ctx.repo
                )
            })?;

        eprintln!(
            "{}",
            color::info(
                self.color_mode,
                format!("Fetching and checking out source branch {source_branch}…")
            )
        );
        self.git_client
            .fetch_branch(&source_branch, SOURCE_FETCH_DEPTH)?;
        self.git_client.checkout(&source_branch)?;

        let current_branch = if ctx.use_commit_signing {
            // The branch is created remotely together with the first signed commit
            eprintln!(
                "{}",
                color::info(
                    self.color_mode,
                    format!("Commit signing enabled, deferring creation of {new_branch}")
                )
            );
            source_branch.clone()
        } else {
            self.git_client.create_branch(&new_branch)?;
            eprintln!(
                "{}",
                color::success(
                    self.color_mode,
                    format!(
                        "Created branch {new_branch} for {kind} #{} from {source_branch}",
                        ctx.entity_number
                    )
                )
            );
            new_branch.clone()
        };

        self.outputs.set_output(CLAUDE_BRANCH, &new_branch)?;
        self.outputs.set_output(BASE_BRANCH, &source_branch)?;

        Ok(BranchInfo {
            base_branch: source_branch,
            claude_branch: Some(new_branch),
            current_branch,
        })
    }

    fn ensure_gh_available(&self) -> Result<()> {
        if !self.gh_client.is_available() {
            anyhow::bail!(
                "GitHub CLI (gh) is not installed or not available.\n\
                 Please install gh from https://cli.github.com/ to resolve branches for new work."
            );
        }
        Ok(())
    }

    /// Caller-supplied base branch, or the repository default branch
    fn source_branch(&self, ctx: &EventContext) -> Result<String> {
        if let Some(branch) = &ctx.base_branch {
            return Ok(branch.clone());
        }

        self.ensure_gh_available()?;
        let repo = self
            .gh_client
            .repo_info(&ctx.repo)
            .with_context(|| format!("Failed to get repository info for {}", ctx.repo))?;
        eprintln!(
            "{}",
            color::dim(
                self.color_mode,
                format!("Using default branch {} of {}", repo.default_branch, ctx.repo)
            )
        );
        Ok(repo.default_branch)
    }
}
