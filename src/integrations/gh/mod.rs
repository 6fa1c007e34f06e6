#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
mod client;
mod event;

pub use client::{GhClient, PrInfo, RealGhClient, RepoInfo};
pub use event::EventPayload;

#[cfg(test)]
pub use client::tests::MockGhClient;

/// Build the ref path used to check that a branch exists
///
/// Format: `heads/{branch}`
pub fn heads_ref(branch: &str) -> String {
    format!("heads/{branch}")
}
