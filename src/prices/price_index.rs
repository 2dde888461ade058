use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// Upper bounds (inclusive) of each signal band
pub const STRONG_BUY_MAX_INDEX: Decimal = Decimal::from_parts(10, 0, 0, false, 2); // 0.10
pub const BUY_MAX_INDEX: Decimal = Decimal::from_parts(40, 0, 0, false, 2); // 0.40
pub const CAUTION_MAX_INDEX: Decimal = Decimal::from_parts(60, 0, 0, false, 2); // 0.60

/// Shown in place of an index or signal that can't be computed
pub const INDETERMINATE_PLACEHOLDER: &str = "—";

/// Position of `current` inside the `[low, high]` band.
///
/// Returns `None` when the band is missing or empty (`low >= high`), or when the ratio
/// doesn't fit a `Decimal`. The result is not clamped: below the low gives a negative
/// index, above the high gives more than one.
pub fn calculate_price_index(current: Decimal, low: Option<Decimal>, high: Option<Decimal>) -> Option<Decimal> {
    let (low, high) = (low?, high?);
    if low >= high {
        return None;
    }
    current.checked_sub(low)?.checked_div(high.checked_sub(low)?)
}

/// Discrete signal for a price index. Ordering is buying priority, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuySignal {
    StrongBuy,
    Buy,
    Caution,
    Avoid,
    Unknown,
}

impl BuySignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuySignal::StrongBuy => "STRONG BUY",
            BuySignal::Buy => "BUY",
            BuySignal::Caution => "CAUTION",
            BuySignal::Avoid => "AVOID",
            BuySignal::Unknown => "UNKNOWN",
        }
    }

    /// Human label, with a dash placeholder for an indeterminate index
    pub fn label(&self) -> &'static str {
        match self {
            BuySignal::StrongBuy => "Strong Buy",
            BuySignal::Buy => "Buy",
            BuySignal::Caution => "Caution",
            BuySignal::Avoid => "Avoid",
            BuySignal::Unknown => INDETERMINATE_PLACEHOLDER,
        }
    }

    /// 1 for STRONG BUY through 5 for UNKNOWN
    pub fn priority(&self) -> u8 {
        *self as u8 + 1
    }
}

impl fmt::Display for BuySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn get_buy_signal(price_index: Option<Decimal>) -> BuySignal {
    match price_index {
        None => BuySignal::Unknown,
        Some(index) if index <= STRONG_BUY_MAX_INDEX => BuySignal::StrongBuy,
        Some(index) if index <= BUY_MAX_INDEX => BuySignal::Buy,
        Some(index) if index <= CAUTION_MAX_INDEX => BuySignal::Caution,
        Some(_) => BuySignal::Avoid,
    }
}
