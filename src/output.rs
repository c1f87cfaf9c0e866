//! User-facing output.
//!
//! All preview, progress, and summary text goes through a [`Reporter`] so
//! that color handling lives in one place and tests can capture the output
//! with an injected writer.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};

use crate::executor::ExecutionResult;
use crate::plan::RenamePlan;

/// Check if we should use colors in output.
fn should_use_colors() -> bool {
    // NO_COLOR (https://no-color.org/) wins over everything.
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stdout().is_terminal()
}

/// Formats and writes all user-facing lines.
pub struct Reporter {
    writer: Box<dyn Write>,
    colors_enabled: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    /// Create a reporter writing to stdout, with color detection.
    pub fn new() -> Self {
        let colors_enabled = should_use_colors();
        if !colors_enabled {
            colored::control::set_override(false);
        }

        Self {
            writer: Box::new(io::stdout()),
            colors_enabled,
        }
    }

    /// Create a reporter with a custom writer (for testing).
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            colors_enabled: false,
        }
    }

    pub fn found(&mut self, count: usize) {
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", format!("Found {count} file(s)").blue());
        } else {
            let _ = writeln!(self.writer, "Found {count} file(s)");
        }
    }

    pub fn no_files_found(&mut self) {
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", "No files found".yellow());
        } else {
            let _ = writeln!(self.writer, "No files found");
        }
    }

    pub fn nothing_to_rename(&mut self) {
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", "No files to rename".yellow());
        } else {
            let _ = writeln!(self.writer, "No files to rename");
        }
    }

    /// Render the full plan: one entry per item plus a total.
    pub fn preview(&mut self, plan: &RenamePlan) {
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", "Preview:".blue().bold());
        } else {
            let _ = writeln!(self.writer, "Preview:");
        }
        self.separator();

        for item in &plan.items {
            if self.colors_enabled {
                let _ = writeln!(
                    self.writer,
                    "  {} {} {}",
                    item.source_name.dimmed(),
                    "→".cyan(),
                    item.destination_name.bold()
                );
            } else {
                let _ = writeln!(
                    self.writer,
                    "  {} -> {}",
                    item.source_name, item.destination_name
                );
            }
        }

        self.separator();
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Total: {} file(s) to rename", plan.len()).cyan()
            );
        } else {
            let _ = writeln!(self.writer, "Total: {} file(s) to rename", plan.len());
        }
    }

    pub fn renamed(&mut self, from: &str, to: &str) {
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                "✓".green().bold(),
                from.dimmed(),
                "→".green(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "* {from} -> {to}");
        }
    }

    pub fn collision(&mut self, from: &str, to: &str) {
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} Skip: {}", "✗".red().bold(), from.red());
            let _ = writeln!(
                self.writer,
                "  {}",
                format!("Target already exists: {to}").dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "X Skip: {from}");
            let _ = writeln!(self.writer, "  Target already exists: {to}");
        }
    }

    pub fn rename_error(&mut self, from: &str, err: &io::Error) {
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✗".red().bold(),
                format!("Error renaming {from}: {err}").red()
            );
        } else {
            let _ = writeln!(self.writer, "X Error renaming {from}: {err}");
        }
    }

    /// Per-item confirmation prompt. Leaves the cursor on the prompt line.
    pub fn confirm_prompt(&mut self, from: &str, to: &str) {
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", "Rename:".cyan());
            let _ = writeln!(self.writer, "  {} {}", "From:".dimmed(), from);
            let _ = writeln!(self.writer, "  {}   {}", "To:".dimmed(), to);
            let _ = write!(self.writer, "{}", "Continue? (y/n/q): ".yellow());
        } else {
            let _ = writeln!(self.writer, "Rename:");
            let _ = writeln!(self.writer, "  From: {from}");
            let _ = writeln!(self.writer, "  To:   {to}");
            let _ = write!(self.writer, "Continue? (y/n/q): ");
        }
        let _ = self.writer.flush();
    }

    /// Whole-batch confirmation prompt. Leaves the cursor on the prompt line.
    pub fn proceed_prompt(&mut self) {
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = write!(self.writer, "{}", "Proceed with rename? (y/n): ".yellow());
        } else {
            let _ = write!(self.writer, "Proceed with rename? (y/n): ");
        }
        let _ = self.writer.flush();
    }

    pub fn batch_declined(&mut self) {
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", "Aborted".yellow());
        } else {
            let _ = writeln!(self.writer, "Aborted");
        }
    }

    /// Final counts. Zero-valued categories are omitted, except "renamed".
    pub fn summary(&mut self, result: &ExecutionResult) {
        let _ = writeln!(self.writer);
        self.separator();

        if self.colors_enabled {
            let mut parts = vec![format!("{}", format!("Renamed: {}", result.renamed).green())];
            if result.skipped > 0 {
                parts.push(format!("{}", format!("Skipped: {}", result.skipped).yellow()));
            }
            if result.errored > 0 {
                parts.push(format!("{}", format!("Errors: {}", result.errored).red()));
            }
            let _ = writeln!(self.writer, "{}", parts.join(" | "));
        } else {
            let mut parts = vec![format!("Renamed: {}", result.renamed)];
            if result.skipped > 0 {
                parts.push(format!("Skipped: {}", result.skipped));
            }
            if result.errored > 0 {
                parts.push(format!("Errors: {}", result.errored));
            }
            let _ = writeln!(self.writer, "{}", parts.join(" | "));
        }
    }

    fn separator(&mut self) {
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", "─".repeat(50).dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", "-".repeat(50));
        }
    }
}
