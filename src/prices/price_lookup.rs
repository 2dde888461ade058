use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Source of current USD prices keyed by price-feed symbol.
///
/// Implementations return zero for unknown symbols; callers rely on that to treat
/// unpriced pools as out of range.
pub trait PriceLookup {
    fn price_usd(&self, symbol: &str) -> Decimal;
}

/// One entry of a simple-price response, e.g. `{"solana": {"usd": 150.2}}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsdQuote {
    pub usd: Decimal,
}

/// Already-fetched prices, keys lower-cased
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, UsdQuote>", into = "HashMap<String, UsdQuote>")]
pub struct PriceMap {
    prices: HashMap<String, Decimal>,
}

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: &str, price_usd: Decimal) {
        self.prices.insert(symbol.to_lowercase(), price_usd);
    }

    pub fn get(&self, symbol: &str) -> Option<Decimal> {
        self.prices.get(&symbol.to_lowercase()).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.prices.contains_key(&symbol.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceLookup for PriceMap {
    fn price_usd(&self, symbol: &str) -> Decimal {
        self.get(symbol).unwrap_or(Decimal::ZERO)
    }
}

impl<S: AsRef<str>> FromIterator<(S, Decimal)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut map = PriceMap::new();
        for (symbol, price) in iter {
            map.insert(symbol.as_ref(), price);
        }
        map
    }
}

impl From<HashMap<String, UsdQuote>> for PriceMap {
    fn from(response: HashMap<String, UsdQuote>) -> Self {
        response.into_iter().map(|(symbol, quote)| (symbol, quote.usd)).collect()
    }
}

impl From<PriceMap> for HashMap<String, UsdQuote> {
    fn from(map: PriceMap) -> Self {
        map.prices
            .into_iter()
            .map(|(symbol, usd)| (symbol, UsdQuote { usd }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_missing_symbol_prices_at_zero() {
        let prices = PriceMap::from_iter([("solana", dec!(150))]);
        assert_eq!(prices.price_usd("solana"), dec!(150));
        assert_eq!(prices.price_usd("morpho"), Decimal::ZERO);
    }

    #[test]
    fn test_symbols_are_case_insensitive() {
        let prices = PriceMap::from_iter([("Chainlink", dec!(14.2))]);
        assert!(prices.contains("chainlink"));
        assert_eq!(prices.price_usd("CHAINLINK"), dec!(14.2));
    }

    #[test]
    fn test_decodes_simple_price_response() {
        let json = r#"{"solana": {"usd": 150.25}, "uniswap": {"usd": 7}}"#;
        let prices: PriceMap = serde_json::from_str(json).unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices.price_usd("solana"), dec!(150.25));
        assert_eq!(prices.price_usd("uniswap"), dec!(7));
    }
}
