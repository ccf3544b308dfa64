//! Rule evaluation results.

use std::fmt;

use serde::Serialize;

/// How much a violated rule matters.
///
/// Only [`Severity::Error`] fails a run; warnings are always reported but
/// never change the verdict.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// One violation produced by exactly one rule evaluation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Finding {
    /// Stable identifier of the rule, e.g. `spread.max_points_large`.
    pub rule_id: &'static str,
    pub severity: Severity,
    /// Configuration key (`filters.atr_period`) or source file path.
    pub subject: String,
    /// Human-readable description, never empty.
    pub message: String,
}

impl Finding {
    #[must_use]
    pub fn new(
        rule_id: &'static str,
        severity: Severity,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "finding for {rule_id} has no message");
        Self {
            rule_id,
            severity,
            subject: subject.into(),
            message,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the finding for human-readable output.
    ///
    /// `{subject}: {message} [{rule_id}]`
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: {} [{}]", self.subject, self.message, self.rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_finding() {
        let finding = Finding::new(
            "spread.max_points_large",
            Severity::Warning,
            "filters.max_spread_points",
            "max_spread_points=150 is possibly too large",
        );
        let formatted = finding.format_human_readable();
        assert_eq!(
            formatted,
            "filters.max_spread_points: max_spread_points=150 is possibly too large [spread.max_points_large]"
        );
        assert!(!finding.is_error());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Error).unwrap();
        assert_eq!(json, "\"error\"");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
