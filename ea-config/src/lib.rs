//! Typed model of an Expert Advisor parameter file.
//!
//! The parameter file is a mapping with three optional sections: `risk`,
//! `filters` and `trading_hours`. Every field has exactly one fallback value,
//! applied by serde when the key is absent, so rule code never performs ad hoc
//! key lookups.
//!
//! ```rust
//! use ea_config::{ConfigFormat, parse_config};
//!
//! let config = parse_config(
//!     r#"{"filters": {"spread_filter_enabled": true, "max_spread_points": 30}}"#,
//!     ConfigFormat::Json,
//! )
//! .unwrap();
//! let filters = config.filters.unwrap();
//! assert!(filters.spread_filter_enabled);
//! assert!(!filters.volatility_filter_enabled);
//! ```

mod error;
mod load;

pub use error::ConfigLoadError;
pub use load::{ConfigFormat, load_config, parse_config};

use serde::Deserialize;

/// A whole parameter file. Absent sections stay `None` so validators can tell
/// "not configured" apart from "configured with defaults".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct EaConfig {
    /// Position sizing and drawdown limits.
    #[serde(default)]
    pub risk: Option<RiskSection>,
    /// Trade filters (spread, volatility, holiday, news, weekend).
    #[serde(default)]
    pub filters: Option<FiltersSection>,
    /// Session boundaries and news blackout windows.
    #[serde(default)]
    pub trading_hours: Option<TradingHoursSection>,
}

impl EaConfig {
    /// Filters section, or an all-defaults section when absent.
    #[must_use]
    pub fn filters_or_default(&self) -> FiltersSection {
        self.filters.clone().unwrap_or_default()
    }

    /// Whether the named filter flag is switched on. Missing section means off.
    #[must_use]
    pub fn filter_enabled(&self, flag: FilterFlag) -> bool {
        self.filters.as_ref().is_some_and(|f| f.is_enabled(flag))
    }
}

/// `risk` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct RiskSection {
    /// Percent of equity risked per trade. Fallback `0`.
    pub risk_per_trade_percent: f64,
    /// Maximum tolerated drawdown in percent. Fallback `0`.
    pub max_drawdown_percent: f64,
}

/// `filters` section.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct FiltersSection {
    pub weekend_filter_enabled: bool,
    pub holiday_filter_enabled: bool,
    pub news_filter_enabled: bool,
    pub spread_filter_enabled: bool,
    pub volatility_filter_enabled: bool,
    /// Hard spread ceiling in points. Fallback `0`.
    pub max_spread_points: f64,
    /// Multiple of the typical spread considered abnormal. Fallback `0`.
    pub normal_spread_multiplier: f64,
    /// ATR lookback in bars. Fallback `0`.
    pub atr_period: f64,
    /// Lower ATR bound for trading. Fallback `0`.
    pub min_atr_value: f64,
    /// Upper ATR bound for trading. Fallback `0`.
    pub max_atr_value: f64,
    /// Non-trading days as `YYYY-MM-DD`. Fallback empty.
    pub holidays: Vec<String>,
}

impl FiltersSection {
    #[must_use]
    pub fn is_enabled(&self, flag: FilterFlag) -> bool {
        match flag {
            FilterFlag::Weekend => self.weekend_filter_enabled,
            FilterFlag::Holiday => self.holiday_filter_enabled,
            FilterFlag::News => self.news_filter_enabled,
            FilterFlag::Spread => self.spread_filter_enabled,
            FilterFlag::Volatility => self.volatility_filter_enabled,
        }
    }
}

/// The `*_enabled` switches of the `filters` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterFlag {
    Weekend,
    Holiday,
    News,
    Spread,
    Volatility,
}

impl FilterFlag {
    /// All flags in display order.
    pub const ALL: [Self; 5] = [
        Self::Weekend,
        Self::Holiday,
        Self::News,
        Self::Spread,
        Self::Volatility,
    ];
}

/// `trading_hours` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct TradingHoursSection {
    /// Hour (server time) after which no new trades open on Friday. Fallback `0`.
    pub friday_close_hour: f64,
    /// Hour (server time) from which trading resumes on Monday. Fallback `0`.
    pub monday_open_hour: f64,
    /// Blackout minutes before a news event. Fallback `0`.
    pub news_avoid_minutes_before: f64,
    /// Blackout minutes after a news event. Fallback `0`.
    pub news_avoid_minutes_after: f64,
}
