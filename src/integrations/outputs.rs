#![allow(clippy::missing_errors_doc)]
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::color;

/// Output holding the generated work branch
pub const CLAUDE_BRANCH: &str = "CLAUDE_BRANCH";

/// Output holding the branch the work branch is based on
pub const BASE_BRANCH: &str = "BASE_BRANCH";

/// Sink for key/value outputs consumed by the surrounding workflow
pub trait OutputWriter {
    fn set_output(&self, name: &str, value: &str) -> Result<()>;
}

/// Appends `NAME=value` lines to the Actions output file
///
/// Without a file (running outside Actions) the pair is reported on stderr.
#[derive(Debug, Clone)]
pub struct FileOutputWriter {
    path: Option<PathBuf>,
    color_mode: color::ColorMode,
}

impl FileOutputWriter {
    pub const fn new(path: Option<PathBuf>, color_mode: color::ColorMode) -> Self {
        Self { path, color_mode }
    }
}

impl OutputWriter for FileOutputWriter {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        if value.contains('\n') {
            anyhow::bail!("Output {name} cannot contain a newline");
        }

        let Some(path) = &self.path else {
            eprintln!(
                "{}",
                color::info(self.color_mode, format!("Output {name}={value}"))
            );
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open output file: {}", path.display()))?;
        writeln!(file, "{name}={value}")
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;

        Ok(())
    }
}
