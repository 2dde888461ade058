use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::price_index::{calculate_price_index, get_buy_signal, BuySignal};
use super::price_lookup::PriceLookup;
use super::ranges::{PriceRange, PriceRanges};

/// A token tracked by the buy analyzer, with manually entered historical bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenToAnalyze {
    #[serde(default)]
    pub id: Option<String>,
    pub token_name: String,
    pub symbol: String,
    #[serde(default)]
    pub all_time_low: Option<Decimal>,
    #[serde(default)]
    pub all_time_high: Option<Decimal>,
    #[serde(default)]
    pub one_year_low: Option<Decimal>,
    #[serde(default)]
    pub one_year_high: Option<Decimal>,
    #[serde(default)]
    pub one_month_low: Option<Decimal>,
    #[serde(default)]
    pub one_month_high: Option<Decimal>,
}

impl TokenToAnalyze {
    /// A token needs a symbol and a non-zero all-time band to be analyzed
    pub fn is_analyzable(&self) -> bool {
        let non_zero = |value: Option<Decimal>| value.is_some_and(|v| !v.is_zero());
        !self.symbol.is_empty() && non_zero(self.all_time_low) && non_zero(self.all_time_high)
    }

    fn manual_one_month_range(&self) -> Option<PriceRange> {
        match (self.one_month_low, self.one_month_high) {
            (Some(min), Some(max)) if !min.is_zero() && !max.is_zero() => Some(PriceRange { min, max }),
            _ => None,
        }
    }
}

/// Index and signal for one horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonSignal {
    pub price_index: Option<Decimal>,
    pub signal: BuySignal,
}

impl HorizonSignal {
    fn from_band(current_price: Decimal, low: Option<Decimal>, high: Option<Decimal>) -> Self {
        let price_index = calculate_price_index(current_price, low, high);
        Self { price_index, signal: get_buy_signal(price_index) }
    }

    fn from_range(current_price: Decimal, range: Option<PriceRange>) -> Self {
        Self::from_band(current_price, range.map(|r| r.min), range.map(|r| r.max))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAnalysis {
    pub id: Option<String>,
    pub token_name: String,
    pub symbol: String,
    pub current_price: Decimal,
    pub all_time: HorizonSignal,
    pub one_year: HorizonSignal,
    pub one_month: HorizonSignal,
    pub six_month: HorizonSignal,
    pub one_month_from_api: bool,
    pub six_month_from_api: bool,
}

/// Scores one token on every horizon independently.
///
/// The one-month band prefers the OHLCV-derived range and falls back to the manual
/// entry; the six-month band only exists when derived from OHLCV data.
pub fn analyze_token(token: &TokenToAnalyze, current_price: Decimal, ranges: Option<&PriceRanges>) -> TokenAnalysis {
    let api_one_month = ranges.and_then(|r| r.one_month);
    let api_six_month = ranges.and_then(|r| r.six_month);

    TokenAnalysis {
        id: token.id.clone(),
        token_name: token.token_name.clone(),
        symbol: token.symbol.clone(),
        current_price,
        all_time: HorizonSignal::from_band(current_price, token.all_time_low, token.all_time_high),
        one_year: HorizonSignal::from_band(current_price, token.one_year_low, token.one_year_high),
        one_month: HorizonSignal::from_range(current_price, api_one_month.or_else(|| token.manual_one_month_range())),
        six_month: HorizonSignal::from_range(current_price, api_six_month),
        one_month_from_api: api_one_month.is_some(),
        six_month_from_api: api_six_month.is_some(),
    }
}

/// Builds the analyzer table: drops unanalyzable tokens and duplicate symbols (first wins),
/// then orders by the all-time signal, most urgent buy first.
#[instrument(skip_all, fields(tokens = tokens.len()))]
pub fn analyze_tokens<P: PriceLookup + ?Sized>(
    tokens: &[TokenToAnalyze],
    prices: &P,
    ranges: &HashMap<String, PriceRanges>,
) -> Vec<TokenAnalysis> {
    let mut seen_symbols = HashSet::new();
    let mut analyzed: Vec<TokenAnalysis> = tokens
        .iter()
        .filter(|token| token.is_analyzable())
        .filter(|token| seen_symbols.insert(token.symbol.clone()))
        .map(|token| analyze_token(token, prices.price_usd(&token.symbol), ranges.get(&token.symbol)))
        .collect();

    analyzed.sort_by_key(|analysis| analysis.all_time.signal.priority());
    debug!(analyzed = analyzed.len(), "Buy analyzer table built");
    analyzed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::price_lookup::PriceMap;
    use rust_decimal::dec;

    fn token(symbol: &str, atl: Decimal, ath: Decimal) -> TokenToAnalyze {
        TokenToAnalyze {
            id: Some(format!("id-{}", symbol)),
            token_name: symbol.to_uppercase(),
            symbol: symbol.to_string(),
            all_time_low: Some(atl),
            all_time_high: Some(ath),
            one_year_low: Some(atl),
            one_year_high: Some(ath),
            one_month_low: None,
            one_month_high: None,
        }
    }

    #[test]
    fn test_horizons_are_independent() {
        let mut t = token("solana", dec!(0), dec!(200));
        t.all_time_low = Some(dec!(100));
        t.one_year_low = Some(dec!(50));
        t.one_year_high = Some(dec!(250));
        t.one_month_low = Some(dec!(140));
        t.one_month_high = Some(dec!(160));

        let analysis = analyze_token(&t, dec!(150), None);
        assert_eq!(analysis.all_time.price_index, Some(dec!(0.5)));
        assert_eq!(analysis.all_time.signal, BuySignal::Caution);
        assert_eq!(analysis.one_year.price_index, Some(dec!(0.5)));
        assert_eq!(analysis.one_month.price_index, Some(dec!(0.5)));
        assert_eq!(analysis.six_month.signal, BuySignal::Unknown);
        assert!(!analysis.one_month_from_api);
    }

    #[test]
    fn test_api_ranges_take_precedence() {
        let mut t = token("chainlink", dec!(1), dec!(51));
        t.one_month_low = Some(dec!(100));
        t.one_month_high = Some(dec!(200));
        let ranges = PriceRanges {
            one_month: Some(PriceRange { min: dec!(10), max: dec!(20) }),
            six_month: Some(PriceRange { min: dec!(10), max: dec!(30) }),
        };

        let analysis = analyze_token(&t, dec!(11), Some(&ranges));
        assert_eq!(analysis.one_month.price_index, Some(dec!(0.1)));
        assert_eq!(analysis.one_month.signal, BuySignal::StrongBuy);
        assert_eq!(analysis.six_month.price_index, Some(dec!(0.05)));
        assert!(analysis.one_month_from_api);
        assert!(analysis.six_month_from_api);
    }

    #[test]
    fn test_table_is_deduplicated_filtered_and_sorted() {
        let mut incomplete = token("morpho", dec!(1), dec!(2));
        incomplete.all_time_high = None;
        let tokens = vec![
            token("uniswap", dec!(0), dec!(10)),
            token("solana", dec!(100), dec!(200)),
            token("solana", dec!(1), dec!(2)),
            incomplete,
            token("chainlink", dec!(10), dec!(20)),
        ];
        let prices = PriceMap::from_iter([("uniswap", dec!(9)), ("solana", dec!(105)), ("chainlink", dec!(14))]);

        let table = analyze_tokens(&tokens, &prices, &HashMap::new());
        let symbols: Vec<&str> = table.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["solana", "chainlink"]);
        assert_eq!(table[0].all_time.signal, BuySignal::StrongBuy);
        assert_eq!(table[1].all_time.signal, BuySignal::Buy);
    }

    #[test]
    fn test_unpriced_token_below_band() {
        let tokens = vec![token("jupiter-exchange-solana", dec!(0.5), dec!(2))];
        let table = analyze_tokens(&tokens, &PriceMap::new(), &HashMap::new());
        assert_eq!(table[0].current_price, Decimal::ZERO);
        assert!(table[0].all_time.price_index.is_some_and(|index| index < Decimal::ZERO));
        assert_eq!(table[0].all_time.signal, BuySignal::StrongBuy);
    }
}
