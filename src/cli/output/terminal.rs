//! Terminal output formatting with colors

use colored::Colorize;

use super::{ItemStatus, RunReport, SummaryRenderer};
use crate::error::ActionDocsError;
use crate::utils::format_duration;

pub struct TerminalOutput {
    /// List every item, not only failures and skips
    verbose: bool,
}

impl TerminalOutput {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn format_items(&self, report: &RunReport) -> String {
        let mut output = String::new();

        for item in &report.items {
            match item.status {
                ItemStatus::Ok if self.verbose => {
                    output.push_str(&format!("  {} {}", "✓".green(), item.path.display()));
                    if let Some(artifact) = &item.artifact {
                        output.push_str(&format!(
                            " {} {}",
                            "→".dimmed(),
                            artifact.display().to_string().cyan()
                        ));
                    }
                    output.push('\n');
                }
                ItemStatus::Ok => {}
                ItemStatus::Failed => {
                    output.push_str(&format!(
                        "  {} {}\n",
                        "✗".red(),
                        item.path.display().to_string().bold()
                    ));
                    for error in &item.errors {
                        output.push_str(&format!("    {} {}\n", "└─".dimmed(), error));
                    }
                }
                ItemStatus::Skipped => {
                    output.push_str(&format!(
                        "  {} {} {}\n",
                        "-".yellow(),
                        item.path.display(),
                        "(skipped)".dimmed()
                    ));
                }
            }
        }

        output
    }

    fn format_counts(&self, report: &RunReport) -> String {
        let summary = &report.summary;
        let mut output = format!(
            "  {} processed, {} succeeded, {} failed",
            summary.processed,
            summary.succeeded.to_string().green(),
            if summary.errored > 0 {
                summary.errored.to_string().red().bold()
            } else {
                summary.errored.to_string().normal()
            }
        );
        if summary.skipped > 0 {
            output.push_str(&format!(", {} skipped", summary.skipped.to_string().yellow()));
        }
        output.push('\n');

        // Validation runs succeed without producing documents
        if summary.artifacts > 0 {
            if summary.dry_run {
                output.push_str(&format!(
                    "  {} {} file(s) would be written\n",
                    "Dry run:".yellow().bold(),
                    summary.would_write
                ));
            } else {
                output.push_str(&format!("  {} file(s) written\n", summary.written));
            }
        }

        output.push_str(&format!(
            "  {} {}\n",
            "Duration:".dimmed(),
            format_duration(report.timing.total())
        ));
        output
    }
}

impl SummaryRenderer for TerminalOutput {
    fn render_summary(&self, report: &RunReport) -> Result<String, ActionDocsError> {
        let mut output = format!(
            "\n{}\n{}\n\n",
            "━".repeat(50).dimmed(),
            format!("  {} SUMMARY", report.command.to_uppercase()).bold()
        );
        output.push_str(&self.format_items(report));
        output.push_str(&self.format_counts(report));
        Ok(output)
    }
}
