//! Branch name validation
//!
//! Every branch name that ends up as an argument of a git (or gh) invocation
//! passes through [`validate`] first. Names come from untrusted places (PR head
//! refs, workflow inputs), so the rules are stricter than `git check-ref-format`.

use thiserror::Error;

/// Characters git refuses in ref names, plus space
const FORBIDDEN_CHARS: &[char] = &[' ', '~', '^', ':', '?', '*', '[', ']', '\\'];

/// Reason a branch name was rejected
///
/// Variants are listed in the order the rules are checked. Only the first
/// violated rule is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BranchNameError {
    #[error("Branch name cannot be empty")]
    Empty,

    #[error("Invalid branch name: {0:?}. Branch names cannot start with '-'")]
    LeadingDash(String),

    #[error("Invalid branch name: {name:?}. Branch names cannot contain {}", describe_char(*.ch))]
    ForbiddenCharacter { name: String, ch: char },

    #[error(
        "Invalid branch name: {0:?}. Branch names must start with a letter or digit \
         and contain only letters, digits, '/', '-', '_' and '.'"
    )]
    NotWhitelisted(String),

    #[error("Invalid branch name: {0:?}. Branch names cannot start or end with '.'")]
    DotBoundary(String),

    #[error("Invalid branch name: {0:?}. Branch names cannot end with '/'")]
    TrailingSlash(String),

    #[error("Invalid branch name: {0:?}. Branch names cannot contain '//'")]
    DoubleSlash(String),

    #[error("Invalid branch name: {0:?}. Branch names cannot contain '..'")]
    DoubleDot(String),

    #[error("Invalid branch name: {0:?}. Branch names cannot end with '.lock'")]
    LockSuffix(String),

    #[error("Invalid branch name: {0:?}. Branch names cannot contain '@{{'")]
    RefExpression(String),
}

fn describe_char(ch: char) -> String {
    if ch == ' ' {
        "spaces".to_string()
    } else if ch.is_ascii_control() {
        format!("control characters ({})", ch.escape_default())
    } else {
        format!("'{ch}'")
    }
}

const fn is_control(ch: char) -> bool {
    matches!(ch, '\u{00}'..='\u{1f}' | '\u{7f}')
}

/// `^[A-Za-z0-9][A-Za-z0-9/_.-]*$`
fn matches_whitelist(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphanumeric()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
}

/// Validate a branch name before it is handed to git
///
/// # Errors
/// Returns the first rule the name violates.
pub fn validate(name: &str) -> Result<(), BranchNameError> {
    if name.trim().is_empty() {
        return Err(BranchNameError::Empty);
    }

    // Would otherwise be parsed as an option by git
    if name.starts_with('-') {
        return Err(BranchNameError::LeadingDash(name.to_string()));
    }

    if let Some(ch) = name
        .chars()
        .find(|&c| is_control(c) || FORBIDDEN_CHARS.contains(&c))
    {
        return Err(BranchNameError::ForbiddenCharacter {
            name: name.to_string(),
            ch,
        });
    }

    if !matches_whitelist(name) {
        return Err(BranchNameError::NotWhitelisted(name.to_string()));
    }

    // The checks below overlap with the whitelist on purpose. Keep them even if
    // the whitelist is relaxed later.
    if name.starts_with('.') || name.ends_with('.') {
        return Err(BranchNameError::DotBoundary(name.to_string()));
    }

    if name.ends_with('/') {
        return Err(BranchNameError::TrailingSlash(name.to_string()));
    }

    if name.contains("//") {
        return Err(BranchNameError::DoubleSlash(name.to_string()));
    }

    if name.contains("..") {
        return Err(BranchNameError::DoubleDot(name.to_string()));
    }

    if name.ends_with(".lock") {
        return Err(BranchNameError::LockSuffix(name.to_string()));
    }

    if name.contains("@{") {
        return Err(BranchNameError::RefExpression(name.to_string()));
    }

    Ok(())
}
