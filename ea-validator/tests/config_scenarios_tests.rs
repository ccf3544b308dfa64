#![allow(clippy::unwrap_used)]
//! Scenario tests for configuration validation.
//!
//! These cover:
//! - Spread filter warnings without errors
//! - Volatility filter errors
//! - Boundary values of spread and ATR rules
//! - Disabled filters never reporting
//! - Holiday list checks against a fixed year
//! - Determinism and verdict monotonicity

use ea_config::{ConfigFormat, EaConfig, parse_config};
use ea_validator::{Finding, Report, RuleCatalog, RuleContext, Severity, validate};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

const YEAR: i32 = 2026;

fn config(json: &str) -> EaConfig {
    parse_config(json, ConfigFormat::Json).unwrap()
}

fn run(json: &str) -> Vec<Finding> {
    validate(
        &config(json),
        &RuleCatalog::standard(),
        &RuleContext::for_year(YEAR),
    )
}

fn count(findings: &[Finding], severity: Severity) -> usize {
    findings.iter().filter(|f| f.severity == severity).count()
}

fn ids(findings: &[Finding]) -> Vec<&'static str> {
    findings.iter().map(|f| f.rule_id).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_wide_spread_and_low_multiplier_warn_only() {
    let findings = run(
        r#"{"filters": {"spread_filter_enabled": true, "max_spread_points": 150, "normal_spread_multiplier": 1.2}}"#,
    );
    assert_eq!(
        ids(&findings),
        vec!["spread.max_points_large", "spread.multiplier_small"]
    );
    assert_eq!(count(&findings, Severity::Error), 0);

    let report = Report::aggregate(findings, vec![]);
    assert!(report.passed);
    assert_eq!(report.warnings_count(), 2);
}

#[test]
fn test_broken_volatility_filter_fails() {
    let findings = run(
        r#"{"filters": {"volatility_filter_enabled": true, "atr_period": 0, "min_atr_value": 5, "max_atr_value": 2}}"#,
    );
    assert_eq!(
        ids(&findings),
        vec![
            "volatility.atr_period_non_positive",
            "volatility.atr_range_inverted"
        ]
    );
    assert_eq!(count(&findings, Severity::Warning), 0);

    let report = Report::aggregate(findings, vec![]);
    assert!(!report.passed);
    assert_eq!(report.errors_count(), 2);
}

#[test]
fn test_spread_boundaries() {
    let zero = run(
        r#"{"filters": {"spread_filter_enabled": true, "max_spread_points": 0, "normal_spread_multiplier": 2}}"#,
    );
    assert_eq!(ids(&zero), vec!["spread.max_points_non_positive"]);

    let tiny = run(
        r#"{"filters": {"spread_filter_enabled": true, "max_spread_points": 0.0001, "normal_spread_multiplier": 2}}"#,
    );
    assert!(tiny.is_empty(), "got: {tiny:?}");

    let large_multiplier = run(
        r#"{"filters": {"spread_filter_enabled": true, "max_spread_points": 30, "normal_spread_multiplier": 5.5}}"#,
    );
    assert_eq!(ids(&large_multiplier), vec!["spread.multiplier_large"]);
}

#[test]
fn test_atr_boundaries() {
    let template = |period: u32, min: f64, max: f64| {
        format!(
            r#"{{"filters": {{"volatility_filter_enabled": true, "atr_period": {period}, "min_atr_value": {min}, "max_atr_value": {max}}}}}"#
        )
    };
    assert!(run(&template(10, 1.0, 2.0)).is_empty());
    assert_eq!(ids(&run(&template(9, 1.0, 2.0))), vec!["volatility.atr_period_short"]);
    assert_eq!(
        ids(&run(&template(14, 2.0, 2.0))),
        vec!["volatility.atr_range_inverted"]
    );
    assert_eq!(
        ids(&run(&template(14, 0.0, 2.0))),
        vec!["volatility.min_atr_non_positive"]
    );
}

#[test]
fn test_disabled_filters_report_nothing_even_when_invalid() {
    let findings = run(
        r#"{
            "filters": {
                "spread_filter_enabled": false, "max_spread_points": -1,
                "volatility_filter_enabled": false, "atr_period": -3, "min_atr_value": 10, "max_atr_value": 1,
                "holiday_filter_enabled": false, "holidays": ["not-a-date"],
                "news_filter_enabled": false
            },
            "trading_hours": {"friday_close_hour": 20, "news_avoid_minutes_before": -10}
        }"#,
    );
    assert!(findings.is_empty(), "got: {findings:?}");
}

#[test]
fn test_holiday_rules() {
    let empty = run(r#"{"filters": {"holiday_filter_enabled": true}}"#);
    assert_eq!(ids(&empty), vec!["holiday.list_empty"]);

    let stale = run(
        r#"{"filters": {"holiday_filter_enabled": true, "holidays": ["2025-12-25", "25.12.2025"]}}"#,
    );
    assert_eq!(
        ids(&stale),
        vec!["holiday.date_format", "holiday.current_year_missing"]
    );
    assert!(stale[1].message.contains("2026"));

    let current = run(
        r#"{"filters": {"holiday_filter_enabled": true, "holidays": ["2026-01-01", "2026-12-25"]}}"#,
    );
    assert!(current.is_empty(), "got: {current:?}");
}

#[test]
fn test_friday_close_before_eighteen_warns() {
    let findings = run(
        r#"{"filters": {}, "trading_hours": {"friday_close_hour": 16, "monday_open_hour": 1}}"#,
    );
    assert_eq!(ids(&findings), vec!["hours.friday_close_early"]);
    assert_eq!(findings[0].subject, "trading_hours.friday_close_hour");
}

#[test]
fn test_unsafe_risk_is_only_a_warning() {
    let findings = run(
        r#"{"risk": {"risk_per_trade_percent": 50, "max_drawdown_percent": 80}, "filters": {}}"#,
    );
    assert_eq!(ids(&findings), vec!["risk.per_trade", "risk.max_drawdown"]);
    assert!(Report::aggregate(findings, vec![]).passed);
}

#[test]
fn test_validation_is_deterministic() {
    let json = r#"{
        "risk": {"risk_per_trade_percent": 1},
        "filters": {"spread_filter_enabled": true, "volatility_filter_enabled": true,
                    "holiday_filter_enabled": true, "news_filter_enabled": true,
                    "holidays": ["2024-01-01", "bad"]},
        "trading_hours": {"friday_close_hour": 25}
    }"#;
    let first = run(json);
    let second = run(json);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_passed_tracks_error_count_only() {
    let json_cases = [
        r#"{"filters": {}}"#,
        r#"{"risk": {"risk_per_trade_percent": 3}, "filters": {}}"#,
        r#"{"filters": {"spread_filter_enabled": true}}"#,
        r#"{"trading_hours": {}}"#,
    ];
    for json in json_cases {
        let findings = run(json);
        let errors = count(&findings, Severity::Error);
        let report = Report::aggregate(findings, vec![]);
        assert_eq!(report.passed, errors == 0, "case: {json}");
    }
}
