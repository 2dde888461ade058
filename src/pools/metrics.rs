use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::pool_constants::{DAYS_PER_YEAR, PERCENT};
use super::types::{EarningRow, PoolMetrics};
use super::validation::{row_days, EarningRowValidator};

/// Metrics for one position's earning history under the default validation rules
pub fn calculate_pool_metrics(earning_rows: &[EarningRow]) -> PoolMetrics {
    calculate_pool_metrics_with(&EarningRowValidator::default(), earning_rows)
}

/// Reduces an earning history into days, earning per day and APR.
///
/// Invalid rows are dropped first. `earning_per_day` is the plain mean over all
/// valid days, while `apr` is the principal-day weighted daily return annualized
/// linearly over 365 days. Rows without principal or duration still count towards
/// `earning_per_day` but carry no weight in the APR. Histories whose totals overflow
/// `Decimal` report the zero state.
pub fn calculate_pool_metrics_with(validator: &EarningRowValidator, earning_rows: &[EarningRow]) -> PoolMetrics {
    let valid_rows = validator.valid_rows(earning_rows);
    if valid_rows.is_empty() {
        return PoolMetrics::default();
    }

    let Some(metrics) = reduce_rows(&valid_rows) else {
        warn!(valid_rows = valid_rows.len(), "Pool metrics overflowed, reporting zero state");
        return PoolMetrics::default();
    };

    debug!(
        valid_rows = valid_rows.len(),
        dropped_rows = earning_rows.len() - valid_rows.len(),
        total_days = metrics.days,
        earning_per_day = %metrics.earning_per_day,
        "Pool metrics calculated"
    );
    metrics
}

/// `None` as soon as any sum, product or quotient leaves the `Decimal` range
fn reduce_rows(rows: &[&EarningRow]) -> Option<PoolMetrics> {
    let mut total_days: i64 = 0;
    let mut total_earnings = Decimal::ZERO;
    // Sum of daily_return * weight, which is just the row's earnings
    let mut weighted_earnings = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;

    for row in rows {
        let days = row_days(row);
        total_days = total_days.checked_add(days)?;
        total_earnings = total_earnings.checked_add(row.earnings)?;

        if row.principal > Decimal::ZERO && days > 0 {
            let weight = row.principal.checked_mul(Decimal::from(days))?;
            weighted_earnings = weighted_earnings.checked_add(row.earnings)?;
            total_weight = total_weight.checked_add(weight)?;
        }
    }

    let earning_per_day = if total_days > 0 {
        total_earnings.checked_div(Decimal::from(total_days))?
    } else {
        Decimal::ZERO
    };

    let apr = if total_weight > Decimal::ZERO {
        let annual_percent = Decimal::from(DAYS_PER_YEAR * PERCENT);
        // Scale before dividing to keep the last digit; divide first only when scaling overflows
        match weighted_earnings.checked_mul(annual_percent) {
            Some(scaled) => scaled.checked_div(total_weight)?,
            None => weighted_earnings.checked_div(total_weight)?.checked_mul(annual_percent)?,
        }
    } else {
        Decimal::ZERO
    };

    Some(PoolMetrics {
        days: total_days,
        earning_per_day: earning_per_day.normalize(),
        apr: apr.normalize(),
    })
}
