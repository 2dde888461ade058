use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::metrics::calculate_pool_metrics_with;
use super::types::{PoolPosition, PoolView, PoolsSummary};
use super::validation::EarningRowValidator;
use crate::prices::price_lookup::PriceLookup;

/// Portfolio summary under the default validation rules
pub fn calculate_pools_summary<P: PriceLookup + ?Sized>(pools: &[PoolPosition], prices: &P) -> PoolsSummary {
    calculate_pools_summary_with(&EarningRowValidator::default(), pools, prices)
}

/// Rolls all pool positions up into portfolio-wide totals.
///
/// Closed positions only feed the realised P/L. For open positions, gathered rows
/// are realised and the rest is unrealised. Only positions whose token trades inside
/// their price band contribute to the daily yield; a symbol missing from the lookup
/// prices at zero and therefore counts as out of range.
#[instrument(skip_all, fields(pools = pools.len(), on_close = true))]
pub fn calculate_pools_summary_with<P: PriceLookup + ?Sized>(
    validator: &EarningRowValidator,
    pools: &[PoolPosition],
    prices: &P,
) -> PoolsSummary {
    let (open_pools, closed_pools): (Vec<&PoolPosition>, Vec<&PoolPosition>) =
        pools.iter().partition(|pool| pool.is_open());

    let total_invested: Decimal = open_pools.iter().map(|pool| pool.latest_principal()).sum();

    let realised_closed: Decimal = closed_pools.iter().map(|pool| pool.total_earnings()).sum();
    let realised_open: Decimal = open_pools.iter().map(|pool| pool.gathered_earnings()).sum();
    let open_earnings: Decimal = open_pools.iter().map(|pool| pool.total_earnings()).sum();

    let mut in_range_count = 0;
    let mut out_of_range_count = 0;
    let mut total_earning_per_day = Decimal::ZERO;

    for pool in &open_pools {
        let current_price = prices.price_usd(&pool.token_symbol);
        if !pool.is_in_range(current_price) {
            out_of_range_count += 1;
            debug!(pool = %pool.pool_name, price = %current_price, "Pool out of range, excluded from daily yield");
            continue;
        }
        in_range_count += 1;
        total_earning_per_day += calculate_pool_metrics_with(validator, &pool.earning_rows).earning_per_day;
    }

    PoolsSummary {
        open_positions_count: open_pools.len(),
        total_invested,
        total_profit_loss: open_earnings - realised_open,
        realised_profit_loss: realised_closed + realised_open,
        total_earning_per_day,
        in_range_count,
        out_of_range_count,
    }
}

/// Per-position metrics and range status, in input order
pub fn describe_pools<'a, P: PriceLookup + ?Sized>(
    validator: &EarningRowValidator,
    pools: &'a [PoolPosition],
    prices: &P,
) -> Vec<PoolView<'a>> {
    pools
        .iter()
        .map(|pool| {
            let current_price = prices.price_usd(&pool.token_symbol);
            PoolView {
                pool,
                metrics: calculate_pool_metrics_with(validator, &pool.earning_rows),
                current_price,
                in_range: pool.is_in_range(current_price),
            }
        })
        .collect()
}
