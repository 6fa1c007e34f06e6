// CommandFactory is used by tests via Cli::command()
#[allow(unused_imports)]
use clap::CommandFactory;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::event::{PrState, RepoSlug};

/// Prepare the working branch for CI bots reacting to GitHub issues and pull requests
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// When to use colored output
    #[arg(long, value_name = "WHEN", global = true, ignore_case = true)]
    pub color: Option<crate::color::ColorMode>,

    /// Working copy to operate on
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        global = true,
        default_value = "."
    )]
    pub workdir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the branch for an event and check it out
    Prepare(PrepareArgs),
    /// Check branch names against the safety rules
    Validate {
        /// Branch names to check
        #[arg(required = true, num_args = 1.., value_name = "NAME", allow_hyphen_values = true)]
        names: Vec<String>,
    },
}

/// Event context for `prepare`
///
/// Flags override values read from the event payload.
#[derive(Args, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PrepareArgs {
    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/NAME")]
    pub repo: Option<RepoSlug>,

    /// Issue or pull request number
    #[arg(long, value_name = "N")]
    pub number: Option<u32>,

    /// The entity is a pull request
    #[arg(long, conflicts_with = "issue")]
    pub pr: bool,

    /// The entity is an issue (overrides the event payload)
    #[arg(long, conflicts_with = "pr")]
    pub issue: bool,

    /// Pull request state
    #[arg(long, value_name = "STATE", ignore_case = true)]
    pub pr_state: Option<PrState>,

    /// Pull request head branch
    #[arg(long, value_name = "BRANCH", allow_hyphen_values = true)]
    pub head_ref: Option<String>,

    /// Pull request base branch
    #[arg(long, value_name = "BRANCH", allow_hyphen_values = true)]
    pub base_ref: Option<String>,

    /// Number of commits in the pull request
    #[arg(long, value_name = "N")]
    pub commits: Option<u32>,

    /// Branch to base new work on (defaults to the repository default branch)
    #[arg(
        long,
        env = "INPUT_BASE_BRANCH",
        value_name = "BRANCH",
        allow_hyphen_values = true
    )]
    pub base_branch: Option<String>,

    /// Prefix for generated branch names
    #[arg(
        long,
        env = "INPUT_BRANCH_PREFIX",
        value_name = "PREFIX",
        allow_hyphen_values = true
    )]
    pub branch_prefix: Option<String>,

    /// Defer branch creation to the component that writes signed commits
    #[arg(
        long,
        env = "INPUT_USE_COMMIT_SIGNING",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub use_commit_signing: bool,

    /// GitHub Actions event payload
    #[arg(long, env = "GITHUB_EVENT_PATH", value_name = "FILE")]
    pub event_path: Option<PathBuf>,

    /// File receiving `NAME=value` outputs
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "FILE")]
    pub output_file: Option<PathBuf>,
}
