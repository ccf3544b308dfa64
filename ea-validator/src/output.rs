//! Shared output formatting for reports.
//!
//! Provides JSON and plain-text formatters for [`Report`]. Color belongs to
//! the CLI layer and is not emitted here.

use std::io::Write;

use crate::report::Report;

const RULE_WIDTH: usize = 60;

/// Format a `Report` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &Report, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `Report` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &Report, title: &str, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(writer, "  {title}")?;
    writeln!(writer, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(writer, "  Config findings:  {}", report.config_findings)?;
    writeln!(writer, "  Source findings:  {}", report.source_findings)?;
    writeln!(writer, "  Errors:           {}", report.errors_count())?;
    writeln!(writer, "  Warnings:         {}", report.warnings_count())?;

    if !report.errors.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "ERRORS:")?;
        for finding in &report.errors {
            writeln!(writer, "  \u{2717} {}", finding.format_human_readable())?;
        }
    }

    if !report.warnings.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "WARNINGS:")?;
        for finding in &report.warnings {
            writeln!(writer, "  ! {}", finding.format_human_readable())?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(writer, "{}", verdict_line(report))?;
    writeln!(writer, "{}", "=".repeat(RULE_WIDTH))?;
    Ok(())
}

/// Final one-line verdict.
#[must_use]
pub fn verdict_line(report: &Report) -> String {
    if report.is_clean() {
        "\u{2713} All checks passed".to_owned()
    } else if report.passed {
        format!("\u{2713} Passed with {} warning(s)", report.warnings_count())
    } else {
        format!("\u{2717} FAILED: {} error(s)", report.errors_count())
    }
}
