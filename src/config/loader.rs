//! Configuration loading logic

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::schema::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration for a working copy
    ///
    /// Load priority:
    /// 1. Local config (.branchprep.toml in `workdir`)
    /// 2. Global config (~/.config/branchprep/config.toml)
    /// 3. Default config
    ///
    /// # Errors
    /// Returns an error if configuration files exist but cannot be read or parsed
    pub fn load_from_dir(workdir: &Path) -> Result<Self> {
        let local_config = Self::local_config_path_from(workdir);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(global_config) = Self::global_config_path() {
            if global_config.exists() {
                return Self::from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Get the local config path in a working copy
    #[must_use]
    pub fn local_config_path_from(workdir: &Path) -> PathBuf {
        workdir.join(".branchprep.toml")
    }

    /// Get the global config path
    /// Respects `XDG_CONFIG_HOME` environment variable on all platforms.
    /// Fallback: `$HOME/.config/branchprep/config.toml`
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;

        Some(config_home.join("branchprep").join("config.toml"))
    }
}
