//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escape codes when the
//! stream is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Cross used in failure lines
pub const CROSS: &str = "✗";

/// Semantic colors for CLI output
pub trait Stylize: Display {
    /// De-emphasised secondary text
    fn muted(&self) -> String;
    /// Headings and labels
    fn emphasis(&self) -> String;
    /// Values worth noticing (names, counts)
    fn accent(&self) -> String;
    /// Success text
    fn success(&self) -> String;
    /// Warnings
    fn warn(&self) -> String;
    /// Errors
    fn error(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }

    fn error(&self) -> String {
        self.red().bold().to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Red cross
pub fn cross() -> String {
    CROSS.error()
}

/// Dimmed arrow for list items
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner style shared by long-running commands
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
