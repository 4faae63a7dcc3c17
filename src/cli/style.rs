//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escape codes when the
//! stream is not a color-capable terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;
use supports_hyperlinks::Stream;

/// Check mark shown when a step finished
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize {
    /// De-emphasized text (hints, empty states)
    fn muted(&self) -> String;
    /// Values worth noticing (counts, ids)
    fn accent(&self) -> String;
    /// Headings and names
    fn emphasis(&self) -> String;
    /// Completed actions
    fn success(&self) -> String;
    /// Non-fatal problems
    fn warn(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Style for the fetch spinner
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Render a URL as a clickable link when stdout supports it
pub fn link(text: &str, url: &str) -> String {
    if supports_hyperlinks::on(Stream::Stdout) {
        terminal_link::Link::new(text, url).to_string()
    } else {
        text.to_string()
    }
}
