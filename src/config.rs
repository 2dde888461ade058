use dotenvy::dotenv;
use eyre::{eyre, Result};
use std::env;
use std::path::PathBuf;

use crate::pools::validation::ValidationRules;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub pools_file: PathBuf,
    pub prices_file: PathBuf,
    pub analyzer_file: PathBuf,
    pub investments_file: PathBuf,
    pub ohlcv_file: PathBuf, // Optional input, skipped when absent
    pub validation_rules: ValidationRules,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, `Config::load` uses the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(lookup("DATA_DIR").unwrap_or_else(|| "data".to_string()));
        let file_or_default = |key: &str, default_name: &str| {
            lookup(key)
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(default_name))
        };

        let allow_negative_earnings = match lookup("ALLOW_NEGATIVE_EARNINGS").as_deref() {
            None | Some("") | Some("false") => false,
            Some("true") => true,
            Some(other) => return Err(eyre!("Invalid ALLOW_NEGATIVE_EARNINGS value '{}' (must be 'true' or 'false')", other)),
        };

        Ok(Config {
            pools_file: file_or_default("POOLS_FILE", "liquidity_pools.json"),
            prices_file: file_or_default("PRICES_FILE", "prices.json"),
            analyzer_file: file_or_default("ANALYZER_FILE", "buy_analyzer_tokens.json"),
            investments_file: file_or_default("INVESTMENTS_FILE", "crypto_investments.json"),
            ohlcv_file: file_or_default("OHLCV_FILE", "ohlcv.json"),
            validation_rules: ValidationRules { allow_negative_earnings },
            data_dir,
        })
    }
}
