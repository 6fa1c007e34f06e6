//! Prepare command - Resolve the branch for an event and check it out

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::PrepareArgs;
use crate::color;
use crate::config::Config;
use crate::domain::event::{EventContext, PrState, RepoSlug};
use crate::integrations::gh::{EventPayload, GhClient, RealGhClient};
use crate::integrations::git::RealGitClient;
use crate::integrations::outputs::FileOutputWriter;
use crate::service::BranchResolver;

/// Treat empty workflow inputs as unset
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Assemble the event context from flags, the event payload and config
///
/// Flags win over the payload. A pull request whose state or refs are still
/// unknown is completed with a lookup through `gh`.
///
/// # Errors
/// Returns an error if the repository or entity number is unknown, or the
/// pull request lookup fails.
pub fn build_context<M: GhClient>(
    args: &PrepareArgs,
    payload: &EventPayload,
    config: &Config,
    gh_client: &M,
    color_mode: color::ColorMode,
) -> Result<EventContext> {
    let repo = match (&args.repo, &payload.repository) {
        (Some(repo), _) => repo.clone(),
        (None, Some(full_name)) => full_name
            .parse::<RepoSlug>()
            .context("Invalid repository in event payload")?,
        (None, None) => anyhow::bail!(
            "Repository not specified. Use --repo owner/name or set GITHUB_REPOSITORY."
        ),
    };

    let entity_number = args.number.or(payload.number).context(
        "Issue or pull request number not specified. Use --number or provide an event payload.",
    )?;

    let is_pr = if args.issue {
        false
    } else {
        args.pr || payload.is_pr
    };

    let mut pr_state = args.pr_state.or(payload.pr_state);
    let mut head_ref = args.head_ref.clone().or_else(|| payload.head_ref.clone());
    let mut base_ref = args.base_ref.clone().or_else(|| payload.base_ref.clone());
    let mut commits = args.commits.or(payload.commits);

    // Refs and the commit count only matter for an open PR
    let needs_details = is_pr
        && match pr_state {
            None => true,
            Some(PrState::Open) => {
                head_ref.is_none() || base_ref.is_none() || commits.is_none()
            }
            Some(PrState::Closed | PrState::Merged) => false,
        };

    if needs_details {
        eprintln!(
            "{}",
            color::info(
                color_mode,
                format!("Fetching details of PR #{entity_number} from {repo}…")
            )
        );
        if !gh_client.is_available() {
            anyhow::bail!(
                "GitHub CLI (gh) is not installed or not available.\n\
                 Please install gh from https://cli.github.com/ or pass --pr-state, --head-ref and --base-ref."
            );
        }
        let pr = gh_client
            .pr_info(&repo, entity_number)
            .with_context(|| format!("Failed to get PR #{entity_number} from {repo}"))?;
        pr_state = pr_state.or(Some(pr.state));
        head_ref = head_ref.or(Some(pr.head_ref));
        base_ref = base_ref.or(Some(pr.base_ref));
        commits = commits.or(Some(pr.commits));
    }

    if !is_pr && (args.head_ref.is_some() || args.base_ref.is_some() || args.pr_state.is_some()) {
        eprintln!(
            "{}",
            color::warn(
                color_mode,
                format!("#{entity_number} is an issue, ignoring pull request flags")
            )
        );
    }

    let branch_prefix =
        non_empty(args.branch_prefix.as_ref()).unwrap_or_else(|| config.branch.prefix.clone());

    Ok(EventContext {
        repo,
        entity_number,
        is_pr,
        pr_state: pr_state.filter(|_| is_pr),
        head_ref: head_ref.filter(|_| is_pr),
        base_ref: base_ref.filter(|_| is_pr),
        commit_count: commits.unwrap_or_default(),
        base_branch: non_empty(args.base_branch.as_ref()),
        branch_prefix,
        use_commit_signing: args.use_commit_signing || config.signing.enabled,
    })
}

/// Prepare the working copy for an event and print the result as JSON
///
/// # Errors
/// Returns an error if:
/// - Configuration or the event payload cannot be read
/// - The event context is incomplete
/// - A branch name fails validation
/// - A metadata lookup or git command fails
pub fn cmd_prepare(args: &PrepareArgs, workdir: &Path, color_mode: color::ColorMode) -> Result<()> {
    let config = Config::load_from_dir(workdir)?;

    let payload = match &args.event_path {
        Some(path) => EventPayload::from_file(path)?,
        None => EventPayload::default(),
    };

    let ctx = build_context(args, &payload, &config, &RealGhClient, color_mode)?;

    let resolver = BranchResolver::new(
        RealGitClient::new(workdir),
        RealGhClient,
        FileOutputWriter::new(args.output_file.clone(), color_mode),
        color_mode,
    );
    let info = resolver.resolve(&ctx)?;

    println!(
        "{}",
        serde_json::to_string(&info).context("Failed to serialize branch info")?
    );

    Ok(())
}
