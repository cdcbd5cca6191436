//! Terminal styling for `--format pretty` output.

use colored::Colorize;

/// Styling helpers; output is plain when stdout is not a terminal.
pub(crate) struct Theme;

impl Theme {
    pub(crate) fn header(title: &str) -> String {
        title.bold().cyan().to_string()
    }

    /// Verdict line for a capability that verified.
    pub(crate) fn success(verdict: &str) -> String {
        format!("{} {verdict}", "✓".green().bold())
    }

    /// Verdict line for a capability that was rejected.
    pub(crate) fn error(verdict: &str) -> String {
        format!("{} {}", "✗".red().bold(), verdict.red())
    }

    /// Indented `label: value` row, labels aligned.
    pub(crate) fn field(label: &str, value: &str) -> String {
        let label = format!("{label}:");
        format!("  {:<10} {value}", label.dimmed())
    }

    /// Rule printed between a rendered message and its request.
    pub(crate) fn separator() -> String {
        "─".repeat(48).dimmed().to_string()
    }
}
