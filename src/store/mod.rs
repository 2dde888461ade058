//! Read-only access to the records the dashboard persists, exported as JSON documents.
//! Every loader returns records in the shape the core expects; schema drift is
//! absorbed here.

pub mod legacy;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::pools::types::PoolPosition;
use crate::prices::analyzer::TokenToAnalyze;
use crate::prices::price_lookup::PriceMap;
use crate::prices::ranges::{calculate_price_ranges, Candle, PriceRanges};
use crate::spot::types::Investment;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unrecognised record shape: {0}")]
    UnknownShape(String),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Loads pool documents, upcasting legacy ones. Undecodable documents are skipped
/// with a warning so one broken record doesn't hide the rest of the portfolio.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_pools(path: &Path) -> Result<Vec<PoolPosition>, StoreError> {
    let records: Vec<Value> = read_json(path)?;
    let total = records.len();

    let pools: Vec<PoolPosition> = records
        .into_iter()
        .filter_map(|record| match legacy::upcast_pool_record(record) {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!(err = %e, "Skipping pool record");
                None
            }
        })
        .collect();

    info!(loaded = pools.len(), skipped = total - pools.len(), "Pools loaded");
    Ok(pools)
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_prices(path: &Path) -> Result<PriceMap, StoreError> {
    let prices: PriceMap = read_json(path)?;
    info!(symbols = prices.len(), "Prices loaded");
    Ok(prices)
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_analyzer_tokens(path: &Path) -> Result<Vec<TokenToAnalyze>, StoreError> {
    let tokens: Vec<TokenToAnalyze> = read_json(path)?;
    info!(tokens = tokens.len(), "Buy analyzer tokens loaded");
    Ok(tokens)
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_investments(path: &Path) -> Result<Vec<Investment>, StoreError> {
    let investments: Vec<Investment> = read_json(path)?;
    info!(investments = investments.len(), "Spot investments loaded");
    Ok(investments)
}

/// Loads daily OHLCV candles per symbol (newest first) and reduces them to price bands
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_price_ranges(path: &Path) -> Result<HashMap<String, PriceRanges>, StoreError> {
    let candles: HashMap<String, Vec<Candle>> = read_json(path)?;
    let ranges: HashMap<String, PriceRanges> = candles
        .into_iter()
        .map(|(symbol, candles)| (symbol, calculate_price_ranges(&candles)))
        .collect();
    info!(symbols = ranges.len(), "Price ranges derived from OHLCV");
    Ok(ranges)
}
