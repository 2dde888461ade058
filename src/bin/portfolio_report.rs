use std::collections::HashMap;

use eyre::WrapErr;
use tracing::{info, instrument, warn};

use crypto_lp_tracker::config;
use crypto_lp_tracker::logging;
use crypto_lp_tracker::pools::summary;
use crypto_lp_tracker::pools::validation::EarningRowValidator;
use crypto_lp_tracker::prices::analyzer;
use crypto_lp_tracker::prices::price_index::INDETERMINATE_PLACEHOLDER;
use crypto_lp_tracker::spot::holdings;
use crypto_lp_tracker::store;

#[instrument(name = "portfolio_report_main")]
fn main() -> eyre::Result<()> {
    // Load configuration (also loads .env)
    let cfg = config::Config::load()?;

    // Initialize logging
    logging::init_logging(env!("CARGO_BIN_NAME"))?;
    info!(data_dir = %cfg.data_dir.display(), rules = ?cfg.validation_rules, "Configuration loaded and logging initialized");

    let prices = store::load_prices(&cfg.prices_file).wrap_err("Failed to load prices")?;
    let validator = EarningRowValidator::new(cfg.validation_rules);

    // Liquidity pools
    let pools = store::load_pools(&cfg.pools_file).wrap_err("Failed to load liquidity pools")?;
    for view in summary::describe_pools(&validator, &pools, &prices) {
        if !prices.contains(&view.pool.token_symbol) {
            warn!(pool = %view.pool.pool_name, symbol = %view.pool.token_symbol, "No price for pool token, treated as out of range");
        }
        info!(
            pool = %view.pool.pool_name,
            status = view.pool.status.as_str(),
            price = %view.current_price,
            in_range = view.in_range,
            days = view.metrics.days,
            earning_per_day = %view.metrics.earning_per_day.round_dp(2),
            apr = %view.metrics.apr.round_dp(2),
            "Pool"
        );
    }
    let pools_summary = summary::calculate_pools_summary_with(&validator, &pools, &prices);
    info!(
        open_positions = pools_summary.open_positions_count,
        total_invested = %pools_summary.total_invested.round_dp(2),
        unrealised_pnl = %pools_summary.total_profit_loss.round_dp(2),
        realised_pnl = %pools_summary.realised_profit_loss.round_dp(2),
        earning_per_day = %pools_summary.total_earning_per_day.round_dp(2),
        in_range = pools_summary.in_range_count,
        out_of_range = pools_summary.out_of_range_count,
        "Liquidity pools summary"
    );

    // Spot holdings
    let investments = store::load_investments(&cfg.investments_file).wrap_err("Failed to load spot investments")?;
    let mut valued = holdings::value_investments(&investments, &prices);
    holdings::sort_investments(&mut valued);
    for holding in &valued {
        info!(
            token = %holding.investment.token_name,
            value = %holding.current_value.round_dp(2),
            pnl = %holding.profit_loss.round_dp(2),
            pnl_pct = %holding.profit_loss_percentage.round_dp(2),
            "Holding"
        );
    }
    let spot_summary = holdings::calculate_spot_summary(&valued, false);
    info!(
        open_positions = spot_summary.open_positions_count,
        total_invested = %spot_summary.total_invested.round_dp(2),
        current_value = %spot_summary.total_current_value.round_dp(2),
        pnl = %spot_summary.total_profit_loss.round_dp(2),
        pnl_pct = %spot_summary.total_profit_loss_percentage.round_dp(2),
        realised_pnl = %spot_summary.realised_profit_loss.round_dp(2),
        "Spot holdings summary"
    );

    // Buy analyzer
    let ranges = if cfg.ohlcv_file.exists() {
        store::load_price_ranges(&cfg.ohlcv_file).wrap_err("Failed to load OHLCV data")?
    } else {
        warn!(path = %cfg.ohlcv_file.display(), "No OHLCV file, one-month bands fall back to manual entries");
        HashMap::new()
    };
    let tokens = store::load_analyzer_tokens(&cfg.analyzer_file).wrap_err("Failed to load buy analyzer tokens")?;
    for analysis in analyzer::analyze_tokens(&tokens, &prices, &ranges) {
        let fmt_index = |index: Option<rust_decimal::Decimal>| {
            index.map(|i| i.round_dp(3).to_string()).unwrap_or_else(|| INDETERMINATE_PLACEHOLDER.to_string())
        };
        info!(
            token = %analysis.token_name,
            price = %analysis.current_price,
            all_time = %format!("{} ({})", fmt_index(analysis.all_time.price_index), analysis.all_time.signal),
            one_year = %format!("{} ({})", fmt_index(analysis.one_year.price_index), analysis.one_year.signal),
            six_month = %format!("{} ({})", fmt_index(analysis.six_month.price_index), analysis.six_month.signal),
            one_month = %format!("{} ({})", fmt_index(analysis.one_month.price_index), analysis.one_month.signal),
            "Buy analyzer"
        );
    }

    Ok(())
}
