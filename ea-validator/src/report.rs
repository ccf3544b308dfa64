//! Aggregated result of one run.

use serde::Serialize;

use crate::finding::{Finding, Severity};

/// Findings of a run partitioned by severity.
///
/// `passed` is true iff there are no errors; warnings never fail a run.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct Report {
    /// Number of findings produced by the config validator.
    pub config_findings: usize,
    /// Number of findings produced by the source scanner.
    pub source_findings: usize,
    pub passed: bool,
    /// Error findings, config findings first, each in discovery order.
    pub errors: Vec<Finding>,
    /// Warning findings, config findings first, each in discovery order.
    pub warnings: Vec<Finding>,
}

impl Report {
    /// Merge config findings and source findings, preserving arrival order.
    #[must_use]
    pub fn aggregate(config_findings: Vec<Finding>, source_findings: Vec<Finding>) -> Self {
        let config_count = config_findings.len();
        let source_count = source_findings.len();
        let (errors, warnings): (Vec<_>, Vec<_>) = config_findings
            .into_iter()
            .chain(source_findings)
            .partition(|f| f.severity == Severity::Error);

        Self {
            config_findings: config_count,
            source_findings: source_count,
            passed: errors.is_empty(),
            errors,
            warnings,
        }
    }

    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn warnings_count(&self) -> usize {
        self.warnings.len()
    }

    /// No findings of either severity.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}
