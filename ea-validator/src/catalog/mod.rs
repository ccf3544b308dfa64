//! The rule catalog.
//!
//! Every rule is a named, stateless function paired with a severity. The
//! catalog is built once by [`RuleCatalog::standard`] and passed by reference
//! into the validators; nothing mutates it afterwards. Rule order inside a
//! domain is catalog order, and validators report findings in that order.

mod config_rules;
mod source_rules;

use std::fmt;

use ea_config::{EaConfig, FiltersSection, RiskSection, TradingHoursSection};

use crate::finding::{Finding, Severity};

/// Inputs to rule evaluation that do not come from the artifact itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    /// Calendar year treated as "current" by holiday rules.
    pub year: i32,
}

impl RuleContext {
    #[must_use]
    pub const fn for_year(year: i32) -> Self {
        Self { year }
    }

    /// Context for the local wall-clock year.
    #[must_use]
    pub fn current() -> Self {
        use chrono::Datelike;
        Self::for_year(chrono::Local::now().year())
    }
}

/// Groups of configuration rules that are switched on and off together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigDomain {
    Risk,
    Spread,
    Volatility,
    Holiday,
    TradingHours,
    News,
}

impl ConfigDomain {
    /// Whether this domain reads the `filters` section.
    #[must_use]
    pub const fn is_filter_domain(self) -> bool {
        !matches!(self, Self::Risk)
    }
}

impl fmt::Display for ConfigDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Risk => "risk",
            Self::Spread => "spread",
            Self::Volatility => "volatility",
            Self::Holiday => "holiday",
            Self::TradingHours => "trading-hours",
            Self::News => "news",
        })
    }
}

/// Kind of source file, decided by where it lives in the project tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceDomain {
    Strategy,
    Indicator,
}

impl fmt::Display for SourceDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strategy => "strategy",
            Self::Indicator => "indicator",
        })
    }
}

/// Every section of a configuration with missing sections replaced by their
/// defaults, so rule functions read plain fields.
#[derive(Debug, Clone, Default)]
pub struct ConfigView {
    pub risk: RiskSection,
    pub filters: FiltersSection,
    pub hours: TradingHoursSection,
}

impl ConfigView {
    #[must_use]
    pub fn new(config: &EaConfig) -> Self {
        Self {
            risk: config.risk.clone().unwrap_or_default(),
            filters: config.filters_or_default(),
            hours: config.trading_hours.clone().unwrap_or_default(),
        }
    }
}

/// Returns one message per violation; empty means the rule holds.
pub type ConfigCheck = fn(&ConfigView, &RuleContext) -> Vec<String>;

/// Returns a message when the file's raw text violates the rule.
pub type SourceCheck = fn(&str) -> Option<String>;

/// A rule over a configuration.
#[derive(Clone)]
pub struct ConfigRule {
    pub id: &'static str,
    pub domain: ConfigDomain,
    pub severity: Severity,
    /// Configuration key the rule inspects, used as the finding subject.
    pub subject: &'static str,
    check: ConfigCheck,
}

impl ConfigRule {
    pub(crate) const fn new(
        id: &'static str,
        domain: ConfigDomain,
        severity: Severity,
        subject: &'static str,
        check: ConfigCheck,
    ) -> Self {
        Self {
            id,
            domain,
            severity,
            subject,
            check,
        }
    }

    /// Evaluate the rule; findings come back in the order the check reports them.
    #[must_use]
    pub fn evaluate(&self, view: &ConfigView, ctx: &RuleContext) -> Vec<Finding> {
        (self.check)(view, ctx)
            .into_iter()
            .map(|message| Finding::new(self.id, self.severity, self.subject, message))
            .collect()
    }
}

impl fmt::Debug for ConfigRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRule")
            .field("id", &self.id)
            .field("domain", &self.domain)
            .field("severity", &self.severity)
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

/// A textual rule over one source file.
#[derive(Clone)]
pub struct SourceRule {
    pub id: &'static str,
    pub domain: SourceDomain,
    pub severity: Severity,
    check: SourceCheck,
}

impl SourceRule {
    pub(crate) const fn new(
        id: &'static str,
        domain: SourceDomain,
        severity: Severity,
        check: SourceCheck,
    ) -> Self {
        Self {
            id,
            domain,
            severity,
            check,
        }
    }

    #[must_use]
    pub fn evaluate(&self, subject: &str, content: &str) -> Option<Finding> {
        (self.check)(content).map(|message| Finding::new(self.id, self.severity, subject, message))
    }
}

impl fmt::Debug for SourceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRule")
            .field("id", &self.id)
            .field("domain", &self.domain)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

/// Summary line used by the `rules` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub id: &'static str,
    pub domain: String,
    pub severity: Severity,
}

/// Immutable table of all rules.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    config_rules: Vec<ConfigRule>,
    source_rules: Vec<SourceRule>,
}

impl RuleCatalog {
    /// The built-in rule set.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            config_rules: config_rules::standard(),
            source_rules: source_rules::standard(),
        }
    }

    /// Configuration rules of one domain, in catalog order.
    pub fn config_rules(&self, domain: ConfigDomain) -> impl Iterator<Item = &ConfigRule> {
        self.config_rules.iter().filter(move |r| r.domain == domain)
    }

    /// Source rules applying to files of `domain`, in catalog order.
    pub fn source_rules(&self, domain: SourceDomain) -> impl Iterator<Item = &SourceRule> {
        self.source_rules.iter().filter(move |r| r.domain == domain)
    }

    /// Every rule as `(id, domain, severity)`, configuration rules first.
    #[must_use]
    pub fn describe(&self) -> Vec<RuleDescriptor> {
        let config = self.config_rules.iter().map(|r| RuleDescriptor {
            id: r.id,
            domain: r.domain.to_string(),
            severity: r.severity,
        });
        let source = self.source_rules.iter().map(|r| RuleDescriptor {
            id: r.id,
            domain: r.domain.to_string(),
            severity: r.severity,
        });
        config.chain(source).collect()
    }

    /// Identifiers of every rule, in catalog order.
    #[must_use]
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.describe().into_iter().map(|d| d.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ids_are_unique() {
        let catalog = RuleCatalog::standard();
        let ids = catalog.rule_ids();
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len(), "duplicate rule ids: {ids:?}");
    }

    #[test]
    fn test_risk_rules_are_never_errors() {
        let catalog = RuleCatalog::standard();
        assert!(
            catalog
                .config_rules(ConfigDomain::Risk)
                .all(|r| r.severity == Severity::Warning)
        );
    }

    #[test]
    fn test_domain_filter_keeps_catalog_order() {
        let catalog = RuleCatalog::standard();
        let ids: Vec<_> = catalog
            .config_rules(ConfigDomain::Volatility)
            .map(|r| r.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "volatility.atr_period_non_positive",
                "volatility.atr_period_short",
                "volatility.min_atr_non_positive",
                "volatility.max_atr_non_positive",
                "volatility.atr_range_inverted",
            ]
        );
    }

    #[test]
    fn test_source_rules_by_domain() {
        let catalog = RuleCatalog::standard();
        let strategy: Vec<_> = catalog.source_rules(SourceDomain::Strategy).map(|r| r.id).collect();
        let indicator: Vec<_> = catalog.source_rules(SourceDomain::Indicator).map(|r| r.id).collect();
        assert_eq!(
            strategy,
            vec!["source.hard_coded_lot", "source.order_without_logging"]
        );
        assert_eq!(indicator, vec!["indicator.repainting"]);
    }
}
