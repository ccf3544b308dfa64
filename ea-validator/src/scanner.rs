//! Source scanning.
//!
//! Each artifact is routed by its domain to the matching source rules.
//! Matching is textual, so findings are heuristics rather than proofs.

use std::path::Path;

use crate::catalog::RuleCatalog;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::finding::Finding;
use crate::source::SourceArtifact;
use crate::source::fs::discover;

/// Findings of a project scan plus how many files were actually read.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ScanOutcome {
    pub findings: Vec<Finding>,
    pub scanned_files: usize,
}

/// Apply the source rules of the artifact's domain, in catalog order.
#[must_use]
pub fn scan_artifact(artifact: &SourceArtifact, catalog: &RuleCatalog) -> Vec<Finding> {
    let subject = artifact.path.display().to_string();
    catalog
        .source_rules(artifact.domain)
        .filter_map(|rule| rule.evaluate(&subject, &artifact.content))
        .collect()
}

/// Scan a sequence of artifacts. Unreadable entries become error findings
/// at the position they were met.
pub fn scan<I>(artifacts: I, catalog: &RuleCatalog) -> ScanOutcome
where
    I: IntoIterator<Item = Result<SourceArtifact, ScanError>>,
{
    let mut outcome = ScanOutcome::default();
    for item in artifacts {
        match item {
            Ok(artifact) => {
                outcome.scanned_files += 1;
                let findings = scan_artifact(&artifact, catalog);
                tracing::debug!(
                    path = %artifact.path.display(),
                    domain = %artifact.domain,
                    findings = findings.len(),
                    "scanned"
                );
                outcome.findings.extend(findings);
            }
            Err(scan_err) => {
                tracing::warn!(error = %scan_err, "source file could not be scanned");
                outcome.findings.push(scan_err.into_finding());
            }
        }
    }
    outcome
}

/// Discover and scan the MQL sources of a project.
///
/// A project without `src/` yields an empty outcome.
#[must_use]
pub fn scan_project(project_root: &Path, config: &ScanConfig, catalog: &RuleCatalog) -> ScanOutcome {
    let artifacts = discover(project_root, config);
    scan(artifacts.iter(), catalog)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::catalog::SourceDomain;
    use crate::error::{SCAN_UNREADABLE_RULE, ScanErrorKind};

    const UNLOGGED_ORDER: &str = "void OnTick() {\n  int t = OrderSend(Symbol(), OP_BUY, lots, Ask, 3, 0, 0);\n}\n";

    #[test]
    fn test_unlogged_order_warns_once() {
        let artifact = SourceArtifact::new("src/Grid.mq4", SourceDomain::Strategy, UNLOGGED_ORDER);
        let findings = scan_artifact(&artifact, &RuleCatalog::standard());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "source.order_without_logging");
        assert_eq!(findings[0].subject, "src/Grid.mq4");
    }

    #[test]
    fn test_logged_order_is_clean() {
        let content = format!("{UNLOGGED_ORDER}void Log() {{ Print(\"order sent\"); }}\n");
        let artifact = SourceArtifact::new("src/Grid.mq4", SourceDomain::Strategy, content);
        assert!(scan_artifact(&artifact, &RuleCatalog::standard()).is_empty());
    }

    #[test]
    fn test_indicator_gets_only_indicator_rules() {
        let artifact = SourceArtifact::new(
            "src/indicators/Trend.mq4",
            SourceDomain::Indicator,
            "int start() { OrderSend(sym, 0.1); }",
        );
        let findings = scan_artifact(&artifact, &RuleCatalog::standard());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "indicator.repainting");
    }

    #[test]
    fn test_hard_coded_lot_and_missing_logging_in_catalog_order() {
        let artifact = SourceArtifact::new(
            "src/Scalper.mq5",
            SourceDomain::Strategy,
            "OrderSend(sym, 0.25, price);",
        );
        let ids: Vec<_> = scan_artifact(&artifact, &RuleCatalog::standard())
            .into_iter()
            .map(|f| f.rule_id)
            .collect();
        assert_eq!(ids, vec!["source.hard_coded_lot", "source.order_without_logging"]);
    }

    #[test]
    fn test_scan_errors_keep_their_position() {
        let items = vec![
            Ok(SourceArtifact::new("src/A.mq4", SourceDomain::Strategy, UNLOGGED_ORDER)),
            Err(ScanError::new(
                PathBuf::from("src/B.mq4"),
                ScanErrorKind::InvalidEncoding,
                "File is neither UTF-8 nor BOM-marked UTF-16",
            )),
            Ok(SourceArtifact::new("src/C.mq4", SourceDomain::Strategy, "int x;")),
        ];
        let outcome = scan(items, &RuleCatalog::standard());
        assert_eq!(outcome.scanned_files, 2);
        let ids: Vec<_> = outcome.findings.iter().map(|f| f.rule_id).collect();
        assert_eq!(ids, vec!["source.order_without_logging", SCAN_UNREADABLE_RULE]);
    }
}
