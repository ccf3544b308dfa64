//! Configuration rules in catalog order.
//!
//! Each check assumes its domain is active; gating on `*_enabled` flags and
//! section presence happens in the config validator.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{ConfigDomain, ConfigRule};
use crate::finding::Severity;

const ISO_DATE: &str = "%Y-%m-%d";

/// chrono tolerates leading whitespace and a signed year; the shape is pinned first.
static ISO_DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^\d{4}-\d{2}-\d{2}$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid ISO date regex: {err}"),
    }
});

fn is_iso_date(text: &str) -> bool {
    ISO_DATE_SHAPE.is_match(text) && NaiveDate::parse_from_str(text, ISO_DATE).is_ok()
}

fn when(violated: bool, message: impl FnOnce() -> String) -> Vec<String> {
    if violated { vec![message()] } else { Vec::new() }
}

fn hour_in_range(hour: f64) -> bool {
    (0.0..=23.0).contains(&hour)
}

pub(super) fn standard() -> Vec<ConfigRule> {
    use ConfigDomain::{Holiday, News, Risk, Spread, TradingHours, Volatility};
    use Severity::{Error, Warning};

    vec![
        // risk
        ConfigRule::new(
            "risk.per_trade",
            Risk,
            Warning,
            "risk.risk_per_trade_percent",
            |v, _| {
                let pct = v.risk.risk_per_trade_percent;
                when(pct > 0.5, || format!("risk per trade is {pct}% (>0.5%)"))
            },
        ),
        ConfigRule::new(
            "risk.max_drawdown",
            Risk,
            Warning,
            "risk.max_drawdown_percent",
            |v, _| {
                let dd = v.risk.max_drawdown_percent;
                when(dd > 10.0, || format!("max drawdown is {dd}% (>10%)"))
            },
        ),
        // spread filter
        ConfigRule::new(
            "spread.max_points_non_positive",
            Spread,
            Error,
            "filters.max_spread_points",
            |v, _| {
                when(v.filters.max_spread_points <= 0.0, || {
                    "max_spread_points must be > 0".to_owned()
                })
            },
        ),
        ConfigRule::new(
            "spread.max_points_large",
            Spread,
            Warning,
            "filters.max_spread_points",
            |v, _| {
                let points = v.filters.max_spread_points;
                when(points > 100.0, || {
                    format!("max_spread_points={points} is possibly too large")
                })
            },
        ),
        ConfigRule::new(
            "spread.multiplier_small",
            Spread,
            Warning,
            "filters.normal_spread_multiplier",
            |v, _| {
                let m = v.filters.normal_spread_multiplier;
                when(m < 1.5, || {
                    format!("normal_spread_multiplier={m} is possibly too small, recommend >= 2.0")
                })
            },
        ),
        ConfigRule::new(
            "spread.multiplier_large",
            Spread,
            Warning,
            "filters.normal_spread_multiplier",
            |v, _| {
                let m = v.filters.normal_spread_multiplier;
                when(m > 5.0, || {
                    format!("normal_spread_multiplier={m} is possibly too large")
                })
            },
        ),
        // volatility filter
        ConfigRule::new(
            "volatility.atr_period_non_positive",
            Volatility,
            Error,
            "filters.atr_period",
            |v, _| when(v.filters.atr_period <= 0.0, || "atr_period must be > 0".to_owned()),
        ),
        ConfigRule::new(
            "volatility.atr_period_short",
            Volatility,
            Warning,
            "filters.atr_period",
            |v, _| {
                let period = v.filters.atr_period;
                when(period > 0.0 && period < 10.0, || {
                    format!("atr_period={period} is possibly too short, recommend >= 14")
                })
            },
        ),
        ConfigRule::new(
            "volatility.min_atr_non_positive",
            Volatility,
            Error,
            "filters.min_atr_value",
            |v, _| {
                when(v.filters.min_atr_value <= 0.0, || {
                    "min_atr_value must be > 0".to_owned()
                })
            },
        ),
        ConfigRule::new(
            "volatility.max_atr_non_positive",
            Volatility,
            Error,
            "filters.max_atr_value",
            |v, _| {
                when(v.filters.max_atr_value <= 0.0, || {
                    "max_atr_value must be > 0".to_owned()
                })
            },
        ),
        ConfigRule::new(
            "volatility.atr_range_inverted",
            Volatility,
            Error,
            "filters.min_atr_value",
            |v, _| {
                let (min, max) = (v.filters.min_atr_value, v.filters.max_atr_value);
                when(min >= max, || {
                    format!("min_atr_value ({min}) must be less than max_atr_value ({max})")
                })
            },
        ),
        // holiday filter
        ConfigRule::new(
            "holiday.list_empty",
            Holiday,
            Warning,
            "filters.holidays",
            |v, _| {
                when(v.filters.holidays.is_empty(), || {
                    "holiday list is empty, add the major market holidays".to_owned()
                })
            },
        ),
        ConfigRule::new(
            "holiday.date_format",
            Holiday,
            Error,
            "filters.holidays",
            |v, _| {
                v.filters
                    .holidays
                    .iter()
                    .filter(|h| !is_iso_date(h))
                    .map(|h| format!("holiday date '{h}' is malformed (expected YYYY-MM-DD)"))
                    .collect()
            },
        ),
        ConfigRule::new(
            "holiday.current_year_missing",
            Holiday,
            Warning,
            "filters.holidays",
            |v, ctx| {
                let holidays = &v.filters.holidays;
                let year = ctx.year.to_string();
                when(
                    !holidays.is_empty() && !holidays.iter().any(|h| h.starts_with(&year)),
                    || format!("holiday list has no entries for {year}, please update it"),
                )
            },
        ),
        // trading hours
        ConfigRule::new(
            "hours.friday_close_range",
            TradingHours,
            Error,
            "trading_hours.friday_close_hour",
            |v, _| {
                let hour = v.hours.friday_close_hour;
                when(!hour_in_range(hour), || {
                    format!("friday_close_hour={hour} is outside [0-23]")
                })
            },
        ),
        ConfigRule::new(
            "hours.monday_open_range",
            TradingHours,
            Error,
            "trading_hours.monday_open_hour",
            |v, _| {
                let hour = v.hours.monday_open_hour;
                when(!hour_in_range(hour), || {
                    format!("monday_open_hour={hour} is outside [0-23]")
                })
            },
        ),
        ConfigRule::new(
            "hours.friday_close_early",
            TradingHours,
            Warning,
            "trading_hours.friday_close_hour",
            |v, _| {
                let hour = v.hours.friday_close_hour;
                when(hour < 18.0, || {
                    format!("friday_close_hour={hour} is early and may miss Friday trading")
                })
            },
        ),
        // news blackout
        ConfigRule::new(
            "news.before_negative",
            News,
            Error,
            "trading_hours.news_avoid_minutes_before",
            |v, _| {
                when(v.hours.news_avoid_minutes_before < 0.0, || {
                    "news_avoid_minutes_before must not be negative".to_owned()
                })
            },
        ),
        ConfigRule::new(
            "news.after_negative",
            News,
            Error,
            "trading_hours.news_avoid_minutes_after",
            |v, _| {
                when(v.hours.news_avoid_minutes_after < 0.0, || {
                    "news_avoid_minutes_after must not be negative".to_owned()
                })
            },
        ),
        ConfigRule::new(
            "news.before_short",
            News,
            Warning,
            "trading_hours.news_avoid_minutes_before",
            |v, _| {
                let minutes = v.hours.news_avoid_minutes_before;
                when(minutes < 15.0, || {
                    format!("news_avoid_minutes_before={minutes} is possibly too short, recommend >= 30")
                })
            },
        ),
        ConfigRule::new(
            "news.after_short",
            News,
            Warning,
            "trading_hours.news_avoid_minutes_after",
            |v, _| {
                let minutes = v.hours.news_avoid_minutes_after;
                when(minutes < 15.0, || {
                    format!("news_avoid_minutes_after={minutes} is possibly too short, recommend >= 30")
                })
            },
        ),
    ]
}
