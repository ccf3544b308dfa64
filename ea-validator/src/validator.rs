//! Configuration validation.

use ea_config::{EaConfig, FilterFlag};

use crate::catalog::{ConfigDomain, ConfigView, RuleCatalog, RuleContext};
use crate::finding::{Finding, Severity};

/// Rule id of the finding emitted when the `filters` section is absent.
pub const FILTERS_MISSING_RULE: &str = "config.filters_missing";

/// Evaluation order of configuration domains.
const DOMAIN_ORDER: [ConfigDomain; 6] = [
    ConfigDomain::Risk,
    ConfigDomain::Spread,
    ConfigDomain::Volatility,
    ConfigDomain::Holiday,
    ConfigDomain::TradingHours,
    ConfigDomain::News,
];

/// Whether rules of `domain` apply to `config`.
///
/// Disabled filters are not range checked at all, so intentionally unused
/// blocks never produce findings.
#[must_use]
pub fn domain_active(config: &EaConfig, domain: ConfigDomain) -> bool {
    if domain.is_filter_domain() && config.filters.is_none() {
        return false;
    }
    match domain {
        ConfigDomain::Risk => true,
        ConfigDomain::Spread => config.filter_enabled(FilterFlag::Spread),
        ConfigDomain::Volatility => config.filter_enabled(FilterFlag::Volatility),
        ConfigDomain::Holiday => config.filter_enabled(FilterFlag::Holiday),
        ConfigDomain::TradingHours => config.trading_hours.is_some(),
        ConfigDomain::News => {
            config.trading_hours.is_some() && config.filter_enabled(FilterFlag::News)
        }
    }
}

/// Validate a configuration against the catalog's configuration rules.
///
/// Findings are ordered by domain, then by catalog order inside the domain.
/// A missing `filters` section adds a single error and skips every filter
/// domain, including trading hours.
#[must_use]
pub fn validate(config: &EaConfig, catalog: &RuleCatalog, ctx: &RuleContext) -> Vec<Finding> {
    let view = ConfigView::new(config);
    let mut findings = Vec::new();

    for domain in DOMAIN_ORDER {
        if !domain_active(config, domain) {
            tracing::debug!(%domain, "rule domain inactive, skipped");
            continue;
        }
        for rule in catalog.config_rules(domain) {
            findings.extend(rule.evaluate(&view, ctx));
        }
        if domain == ConfigDomain::Risk && config.filters.is_none() {
            findings.push(Finding::new(
                FILTERS_MISSING_RULE,
                Severity::Error,
                "filters",
                "missing filters section",
            ));
        }
    }

    tracing::info!(findings = findings.len(), "configuration validated");
    findings
}
