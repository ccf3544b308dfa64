//! Source hygiene rules.
//!
//! These are textual heuristics over the whole file, not a parse of the MQL
//! grammar. A `Print` anywhere in the file satisfies the logging rule even if
//! it is unrelated to the order call.

use std::sync::LazyLock;

use regex::Regex;

use super::{SourceDomain, SourceRule};
use crate::finding::Severity;

const ORDER_CALL: &str = "OrderSend";
const LOGGING_CALL: &str = "Print";
const COUNTED_BARS_API: &str = "IndicatorCounted()";
const PREV_CALCULATED: &str = "prev_calculated";

/// `OrderSend(symbol, 0.10, ...)`: a decimal literal as the second argument.
static HARD_CODED_LOT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"OrderSend\s*\([^,]*,\s*\d+\.\d+") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid hard-coded lot regex: {err}"),
    }
});

fn hard_coded_lot(content: &str) -> Option<String> {
    HARD_CODED_LOT_PATTERN
        .is_match(content)
        .then(|| "possible hard-coded lot size in OrderSend".to_owned())
}

fn order_without_logging(content: &str) -> Option<String> {
    (content.contains(ORDER_CALL) && !content.contains(LOGGING_CALL))
        .then(|| "OrderSend without logging".to_owned())
}

fn repainting(content: &str) -> Option<String> {
    (!content.contains(COUNTED_BARS_API) && !content.contains(PREV_CALCULATED)).then(|| {
        "possible repainting: missing incremental buffer calculation".to_owned()
    })
}

pub(super) fn standard() -> Vec<SourceRule> {
    vec![
        SourceRule::new(
            "source.hard_coded_lot",
            SourceDomain::Strategy,
            Severity::Warning,
            hard_coded_lot,
        ),
        SourceRule::new(
            "source.order_without_logging",
            SourceDomain::Strategy,
            Severity::Warning,
            order_without_logging,
        ),
        SourceRule::new(
            "indicator.repainting",
            SourceDomain::Indicator,
            Severity::Warning,
            repainting,
        ),
    ]
}
