use std::env;
use std::fmt;
use std::str::FromStr;

use owo_colors::OwoColorize;

/// Color mode for terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Automatically detect whether to use colors
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl FromStr for ColorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("always") {
            Ok(Self::Always)
        } else if s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else if s.eq_ignore_ascii_case("never") {
            Ok(Self::Never)
        } else {
            anyhow::bail!("Invalid color mode: {s}. Expected one of: always, auto, never")
        }
    }
}

impl ColorMode {
    /// Resolve color mode from CLI flag and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. CLI flag (`--color=always|auto|never`)
    /// 2. `NO_COLOR` environment variable
    /// 3. `TERM=dumb` environment variable
    /// 4. Default (Auto)
    #[must_use]
    pub fn resolve(cli_mode: Option<Self>) -> Self {
        if let Some(mode) = cli_mode {
            return mode;
        }

        if env::var("NO_COLOR").is_ok() {
            return Self::Never;
        }

        if let Ok(term) = env::var("TERM") {
            if term == "dumb" {
                return Self::Never;
            }
        }

        Self::Auto
    }

    /// Check if colors should be enabled based on the mode and TTY detection
    ///
    /// Progress is written to stderr, so that is the stream checked.
    /// stdout carries the JSON result and is never colored.
    #[must_use]
    pub fn should_colorize(self) -> bool {
        match self {
            Self::Always => true,
            Self::Auto => supports_color::on_cached(supports_color::Stream::Stderr).is_some(),
            Self::Never => false,
        }
    }
}

/// Message style for different types of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// Success message (green ✓)
    Success,
    /// Info/progress message (cyan ℹ)
    Info,
    /// Warning message (yellow ⚠)
    Warn,
    /// Error message (red ✗)
    Error,
}

impl MessageStyle {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Info => "ℹ",
            Self::Warn => "⚠",
            Self::Error => "✗",
        }
    }

    /// Format a message with this style
    #[allow(clippy::missing_const_for_fn)]
    pub fn format<D: fmt::Display>(self, mode: ColorMode, message: D) -> FormattedMessage<D> {
        FormattedMessage {
            style: self,
            mode,
            message,
        }
    }
}

/// A formatted message with color and symbol
pub struct FormattedMessage<D> {
    style: MessageStyle,
    mode: ColorMode,
    message: D,
}

impl<D: fmt::Display> fmt::Display for FormattedMessage<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.style.symbol();
        if !self.mode.should_colorize() {
            return write!(f, "{symbol} {}", self.message);
        }
        match self.style {
            MessageStyle::Success => write!(f, "{} {}", symbol.bright_green().bold(), self.message),
            MessageStyle::Info => write!(f, "{} {}", symbol.bright_cyan(), self.message),
            MessageStyle::Warn => write!(f, "{} {}", symbol.bright_yellow(), self.message),
            MessageStyle::Error => write!(f, "{} {}", symbol.bright_red().bold(), self.message),
        }
    }
}

/// Format a success message (green ✓)
pub fn success<D: fmt::Display>(mode: ColorMode, message: D) -> FormattedMessage<D> {
    MessageStyle::Success.format(mode, message)
}

/// Format an info/progress message (cyan ℹ)
pub fn info<D: fmt::Display>(mode: ColorMode, message: D) -> FormattedMessage<D> {
    MessageStyle::Info.format(mode, message)
}

/// Format a warning message (yellow ⚠)
pub fn warn<D: fmt::Display>(mode: ColorMode, message: D) -> FormattedMessage<D> {
    MessageStyle::Warn.format(mode, message)
}

/// Format an error message (red ✗)
pub fn error<D: fmt::Display>(mode: ColorMode, message: D) -> FormattedMessage<D> {
    MessageStyle::Error.format(mode, message)
}

/// Dimmed text for secondary information
pub struct DimmedText<D> {
    mode: ColorMode,
    text: D,
}

impl<D: fmt::Display> fmt::Display for DimmedText<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode.should_colorize() {
            write!(f, "{}", format!("{}", self.text).dimmed())
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// Dim text for secondary information (refs, depths, lookups)
#[allow(clippy::missing_const_for_fn)]
pub fn dim<D: fmt::Display>(mode: ColorMode, text: D) -> DimmedText<D> {
    DimmedText { mode, text }
}
