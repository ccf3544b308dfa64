//! Read-only advice derived from a configuration.
//!
//! Nothing here produces findings or affects the verdict.

use ea_config::{EaConfig, FilterFlag};

use crate::catalog::RuleContext;

/// Reference holidays as `(name, MM-DD)`. Thanksgiving moves every year; the
/// fixed date is an approximation.
const REFERENCE_HOLIDAYS: [(&str, &str); 4] = [
    ("New Year", "01-01"),
    ("Independence Day", "07-04"),
    ("Thanksgiving", "11-28"),
    ("Christmas", "12-25"),
];

const SPREAD_TIPS: &[&str] = &[
    "Spread filter enabled: tune max_spread_points per instrument",
    "  - major pairs (EURUSD, GBPUSD): 20-30 points",
    "  - crosses: 30-50 points",
    "  - gold: 50-100 points",
];

const VOLATILITY_TIPS: &[&str] = &[
    "Volatility filter enabled: ATR thresholds depend on instrument and timeframe",
    "  - run for a while first and record the normal ATR range",
    "  - optimize min_atr_value and max_atr_value on historical data",
];

const NEWS_TIPS: &[&str] = &[
    "News filter enabled: feed it from an external economic calendar",
    "  - ForexFactory Calendar",
    "  - Investing.com Economic Calendar",
];

/// Which reference holidays of the context year are in the holiday list.
///
/// Empty unless the holiday filter is enabled with a non-empty list.
#[must_use]
pub fn holiday_coverage(config: &EaConfig, ctx: &RuleContext) -> Vec<String> {
    let Some(filters) = config.filters.as_ref() else {
        return Vec::new();
    };
    if !filters.holiday_filter_enabled || filters.holidays.is_empty() {
        return Vec::new();
    }

    REFERENCE_HOLIDAYS
        .iter()
        .map(|(name, month_day)| {
            let date = format!("{}-{month_day}", ctx.year);
            if filters.holidays.contains(&date) {
                format!("[x] {name} ({date})")
            } else {
                format!("[ ] {name} ({date}) not configured")
            }
        })
        .collect()
}

/// Static tuning guidance for each enabled filter.
#[must_use]
pub fn tuning_suggestions(config: &EaConfig) -> Vec<String> {
    [
        (FilterFlag::Spread, SPREAD_TIPS),
        (FilterFlag::Volatility, VOLATILITY_TIPS),
        (FilterFlag::News, NEWS_TIPS),
    ]
    .into_iter()
    .filter(|(flag, _)| config.filter_enabled(*flag))
    .flat_map(|(_, tips)| tips.iter().map(|tip| (*tip).to_owned()))
    .collect()
}

/// Holiday coverage followed by tuning suggestions.
#[must_use]
pub fn advise(config: &EaConfig, ctx: &RuleContext) -> Vec<String> {
    let mut advice = holiday_coverage(config, ctx);
    advice.extend(tuning_suggestions(config));
    advice
}

/// Enabled state of every filter, in display order.
#[must_use]
pub fn filter_status(config: &EaConfig) -> Vec<(&'static str, bool)> {
    FilterFlag::ALL
        .into_iter()
        .map(|flag| (filter_label(flag), config.filter_enabled(flag)))
        .collect()
}

const fn filter_label(flag: FilterFlag) -> &'static str {
    match flag {
        FilterFlag::Weekend => "Weekend filter",
        FilterFlag::Holiday => "Holiday filter",
        FilterFlag::News => "News filter",
        FilterFlag::Spread => "Spread filter",
        FilterFlag::Volatility => "Volatility filter",
    }
}

#[cfg(test)]
mod tests {
    use ea_config::{ConfigFormat, parse_config};

    use super::*;

    fn config(json: &str) -> EaConfig {
        parse_config(json, ConfigFormat::Json).unwrap()
    }

    #[test]
    fn test_holiday_coverage_marks_present_and_missing() {
        let cfg = config(
            r#"{"filters": {"holiday_filter_enabled": true, "holidays": ["2026-01-01", "2026-12-25", "2025-07-04"]}}"#,
        );
        let lines = holiday_coverage(&cfg, &RuleContext::for_year(2026));
        assert_eq!(
            lines,
            vec![
                "[x] New Year (2026-01-01)",
                "[ ] Independence Day (2026-07-04) not configured",
                "[ ] Thanksgiving (2026-11-28) not configured",
                "[x] Christmas (2026-12-25)",
            ]
        );
    }

    #[test]
    fn test_holiday_coverage_needs_enabled_filter_and_list() {
        let ctx = RuleContext::for_year(2026);
        assert!(holiday_coverage(&config(r#"{"filters": {"holidays": ["2026-01-01"]}}"#), &ctx).is_empty());
        assert!(
            holiday_coverage(&config(r#"{"filters": {"holiday_filter_enabled": true}}"#), &ctx).is_empty()
        );
        assert!(holiday_coverage(&config("{}"), &ctx).is_empty());
    }

    #[test]
    fn test_tuning_is_gated_per_filter() {
        assert!(tuning_suggestions(&config(r#"{"filters": {}}"#)).is_empty());

        let tips = tuning_suggestions(&config(
            r#"{"filters": {"news_filter_enabled": true, "spread_filter_enabled": true}}"#,
        ));
        assert_eq!(tips.len(), SPREAD_TIPS.len() + NEWS_TIPS.len());
        assert!(tips[0].starts_with("Spread filter enabled"));
        assert!(tips[SPREAD_TIPS.len()].starts_with("News filter enabled"));
    }

    #[test]
    fn test_advise_orders_coverage_first() {
        let cfg = config(
            r#"{"filters": {"holiday_filter_enabled": true, "volatility_filter_enabled": true, "holidays": ["2026-11-28"]}}"#,
        );
        let advice = advise(&cfg, &RuleContext::for_year(2026));
        assert_eq!(advice.len(), REFERENCE_HOLIDAYS.len() + VOLATILITY_TIPS.len());
        assert_eq!(advice[2], "[x] Thanksgiving (2026-11-28)");
        assert!(advice[4].starts_with("Volatility filter enabled"));
    }

    #[test]
    fn test_filter_status() {
        let status = filter_status(&config(r#"{"filters": {"weekend_filter_enabled": true}}"#));
        assert_eq!(status.len(), 5);
        assert_eq!(status[0], ("Weekend filter", true));
        assert!(status[1..].iter().all(|(_, enabled)| !enabled));
    }
}
