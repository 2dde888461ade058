use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
pub const ONE_MONTH_DAYS: i64 = 30;
pub const SIX_MONTH_DAYS: i64 = 182;

/// Daily candle as returned by the OHLCV endpoint: `[timestamp, open, high, low, close, volume]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "(i64, Decimal, Decimal, Decimal, Decimal, Decimal)")]
pub struct Candle {
    pub timestamp: i64, // Unix seconds
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl From<(i64, Decimal, Decimal, Decimal, Decimal, Decimal)> for Candle {
    fn from((timestamp, open, high, low, close, volume): (i64, Decimal, Decimal, Decimal, Decimal, Decimal)) -> Self {
        Self { timestamp, open, high, low, close, volume }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Bands derived from recent candles, `None` when a window has no data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRanges {
    pub one_month: Option<PriceRange>,
    pub six_month: Option<PriceRange>,
}

/// Computes the one-month and six-month bands from candles ordered newest first.
/// Windows are anchored on the newest candle, not on the wall clock.
pub fn calculate_price_ranges(candles: &[Candle]) -> PriceRanges {
    let Some(latest) = candles.first() else {
        return PriceRanges::default();
    };

    PriceRanges {
        one_month: range_since(candles, latest.timestamp - ONE_MONTH_DAYS * SECONDS_PER_DAY),
        six_month: range_since(candles, latest.timestamp - SIX_MONTH_DAYS * SECONDS_PER_DAY),
    }
}

fn range_since(candles: &[Candle], start: i64) -> Option<PriceRange> {
    candles
        .iter()
        .filter(|candle| candle.timestamp >= start)
        .fold(None, |range: Option<PriceRange>, candle| {
            Some(match range {
                None => PriceRange { min: candle.low, max: candle.high },
                Some(range) => PriceRange {
                    min: range.min.min(candle.low),
                    max: range.max.max(candle.high),
                },
            })
        })
}
