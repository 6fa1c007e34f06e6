//! Configuration schema and type definitions

use serde::Deserialize;

/// Configuration for branchprep
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub branch: BranchConfig,
    #[serde(default)]
    pub signing: SigningConfig,
}

/// Branch naming settings
#[derive(Debug, Clone, Deserialize)]
pub struct BranchConfig {
    /// Prefix for generated work branches
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    "claude/".to_string()
}

/// Commit signing settings
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct SigningConfig {
    /// Defer branch creation to the component that writes signed commits
    #[serde(default)]
    pub enabled: bool,
}
