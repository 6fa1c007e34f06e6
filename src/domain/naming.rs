//! Branch naming and fetch depth rules

use chrono::NaiveDateTime;

use super::event::EntityKind;

/// Minimum history fetched for an open PR
pub const MIN_FETCH_DEPTH: u32 = 20;

/// Generated branch names are cut to this many characters
pub const MAX_BRANCH_NAME_LEN: usize = 50;

/// Fetch depth for an open PR: its commit count, but never below the floor
#[must_use]
pub fn fetch_depth(commit_count: u32) -> u32 {
    commit_count.max(MIN_FETCH_DEPTH)
}

/// Format a timestamp as `YYYYMMDD-HHmm`
#[must_use]
pub fn timestamp(at: NaiveDateTime) -> String {
    at.format("%Y%m%d-%H%M").to_string()
}

/// Build the name of a new work branch
///
/// Format: `{prefix}{kind}-{number}-{YYYYMMDD-HHmm}`, lowercased and cut to
/// [`MAX_BRANCH_NAME_LEN`] characters.
#[must_use]
pub fn generate_branch_name(
    prefix: &str,
    kind: EntityKind,
    number: u32,
    at: NaiveDateTime,
) -> String {
    format!("{prefix}{kind}-{number}-{}", timestamp(at))
        .to_lowercase()
        .chars()
        .take(MAX_BRANCH_NAME_LEN)
        .collect()
}
