//! # ea-validator
//!
//! Pre-deployment checks for Expert Advisor projects.
//!
//! Two independent validators feed one report:
//! - the **config validator** applies risk and filter rules to a parameter file;
//! - the **source scanner** applies textual hygiene rules to MQL sources.
//!
//! Both draw their rules from an explicitly constructed [`RuleCatalog`].
//! Errors fail a run, warnings never do. The engine only reads its inputs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use ea_validator::{RuleCatalog, RuleContext, ScanConfig, check_project};
//!
//! let catalog = RuleCatalog::standard();
//! let report = check_project(
//!     Path::new("."),
//!     &ScanConfig::default(),
//!     &catalog,
//!     &RuleContext::current(),
//! )
//! .unwrap();
//! println!("Errors: {}", report.errors_count());
//! println!("Warnings: {}", report.warnings_count());
//! println!("Passed: {}", report.passed);
//! ```

pub mod advisory;
mod catalog;
mod config;
mod error;
mod finding;
pub mod output;
mod report;
mod scanner;
pub mod source;
mod validator;

use std::path::Path;

use ea_config::{ConfigLoadError, EaConfig, load_config};

pub use catalog::{
    ConfigDomain, ConfigRule, ConfigView, RuleCatalog, RuleContext, RuleDescriptor, SourceDomain,
    SourceRule,
};
pub use config::ScanConfig;
pub use error::{SCAN_UNREADABLE_RULE, ScanError, ScanErrorKind};
pub use finding::{Finding, Severity};
pub use report::Report;
pub use scanner::{ScanOutcome, scan, scan_artifact, scan_project};
pub use validator::{FILTERS_MISSING_RULE, domain_active, validate};

/// Default parameter file of a project, relative to its root.
pub const PROJECT_CONFIG_PATH: &str = "config/params.default.json";

/// Rule id of the finding emitted when a project has no parameter file.
pub const CONFIG_MISSING_RULE: &str = "config.missing";

/// Load a parameter file and validate it on its own.
///
/// Returns the loaded configuration alongside the report so callers can run
/// the advisory module on it.
///
/// # Errors
///
/// Returns a [`ConfigLoadError`] if the file is missing or malformed; no rule
/// runs in that case.
pub fn validate_config_file(
    path: &Path,
    catalog: &RuleCatalog,
    ctx: &RuleContext,
) -> Result<(EaConfig, Report), ConfigLoadError> {
    let config = load_config(path)?;
    tracing::info!(path = %path.display(), "configuration loaded");
    let findings = validate(&config, catalog, ctx);
    Ok((config, Report::aggregate(findings, Vec::new())))
}

/// Validate a whole project: its parameter file and its MQL sources.
///
/// A project without `config/params.default.json` gets a `config.missing`
/// error finding instead of configuration findings; a project without `src/`
/// simply has no source findings.
///
/// # Errors
///
/// Returns a [`ConfigLoadError`] if the parameter file exists but cannot be
/// read or parsed.
pub fn check_project(
    project_root: &Path,
    scan_config: &ScanConfig,
    catalog: &RuleCatalog,
    ctx: &RuleContext,
) -> Result<Report, ConfigLoadError> {
    let config_path = project_root.join(PROJECT_CONFIG_PATH);
    let config_findings = if config_path.exists() {
        let config = load_config(&config_path)?;
        validate(&config, catalog, ctx)
    } else {
        tracing::warn!(path = %config_path.display(), "project has no parameter file");
        vec![Finding::new(
            CONFIG_MISSING_RULE,
            Severity::Error,
            PROJECT_CONFIG_PATH,
            format!("Missing {PROJECT_CONFIG_PATH}"),
        )]
    };

    let outcome = scan_project(project_root, scan_config, catalog);
    tracing::info!(
        scanned_files = outcome.scanned_files,
        findings = outcome.findings.len(),
        "sources scanned"
    );
    Ok(Report::aggregate(config_findings, outcome.findings))
}
