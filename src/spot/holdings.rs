use std::cmp::Reverse;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::instrument;

use super::types::{Investment, SortOrder, SpotSummary, ValuedInvestment};
use crate::pools::validation::parse_date;
use crate::prices::price_lookup::PriceLookup;

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Zero when the base is zero or the ratio overflows
fn percentage_of(amount: Decimal, base: Decimal) -> Decimal {
    amount
        .checked_div(base)
        .and_then(|ratio| ratio.checked_mul(PERCENT))
        .unwrap_or(Decimal::ZERO)
}

/// Marks an investment to market: open holdings use the live price (zero when unpriced),
/// closed holdings stay at their close price.
pub fn value_investment<P: PriceLookup + ?Sized>(investment: &Investment, prices: &P) -> ValuedInvestment {
    let current_price = if investment.is_closed() {
        investment.close_price.unwrap_or(Decimal::ZERO)
    } else {
        prices.price_usd(&investment.symbol)
    };
    let current_value = investment.quantity * current_price;
    let profit_loss = current_value - investment.amount_paid;

    ValuedInvestment {
        investment: investment.clone(),
        current_price,
        current_value,
        profit_loss,
        profit_loss_percentage: percentage_of(profit_loss, investment.amount_paid),
    }
}

pub fn value_investments<P: PriceLookup + ?Sized>(investments: &[Investment], prices: &P) -> Vec<ValuedInvestment> {
    investments.iter().map(|inv| value_investment(inv, prices)).collect()
}

/// Totals over open holdings, or over everything when `include_closed` is set.
/// Realised P/L always covers every closed holding.
#[instrument(skip_all, fields(holdings = valued.len(), include_closed = include_closed))]
pub fn calculate_spot_summary(valued: &[ValuedInvestment], include_closed: bool) -> SpotSummary {
    let shown: Vec<&ValuedInvestment> = valued
        .iter()
        .filter(|v| include_closed || !v.investment.is_closed())
        .collect();

    let total_invested: Decimal = shown.iter().map(|v| v.investment.amount_paid).sum();
    let total_current_value: Decimal = shown.iter().map(|v| v.current_value).sum();
    let total_profit_loss = total_current_value - total_invested;
    let realised_profit_loss: Decimal = valued
        .iter()
        .filter(|v| v.investment.is_closed())
        .map(|v| v.current_value - v.investment.amount_paid)
        .sum();

    SpotSummary {
        open_positions_count: valued.iter().filter(|v| !v.investment.is_closed()).count(),
        total_invested,
        total_current_value,
        total_profit_loss,
        total_profit_loss_percentage: if total_invested > Decimal::ZERO {
            percentage_of(total_profit_loss, total_invested)
        } else {
            Decimal::ZERO
        },
        realised_profit_loss,
    }
}

/// Dates were entered either as ISO dates or as US locale dates
fn parse_date_added(value: &str) -> Option<NaiveDate> {
    parse_date(value).or_else(|| NaiveDate::parse_from_str(value.trim(), "%m/%d/%Y").ok())
}

/// Newest first, alphabetical by token name within the same day.
/// Unparseable dates sort last.
pub fn sort_investments(valued: &mut [ValuedInvestment]) {
    valued.sort_by(|a, b| a.investment.token_name.cmp(&b.investment.token_name));
    valued.sort_by_key(|v| Reverse(parse_date_added(&v.investment.date_added)));
}

/// Orders by P/L percentage; the sort is stable so ties keep their previous order
pub fn sort_by_profit_loss_percentage(valued: &mut [ValuedInvestment], order: SortOrder) {
    valued.sort_by(|a, b| {
        let ord = a.profit_loss_percentage.cmp(&b.profit_loss_percentage);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::price_lookup::PriceMap;
    use crate::spot::types::InvestmentStatus;
    use rust_decimal::dec;

    fn investment(id: &str, name: &str, date: &str, quantity: Decimal, paid: Decimal) -> Investment {
        Investment {
            id: id.to_string(),
            token_name: name.to_string(),
            symbol: name.to_lowercase(),
            date_added: date.to_string(),
            status: InvestmentStatus::Open,
            quantity,
            purchase_price: paid / quantity,
            amount_paid: paid,
            close_price: None,
            sold: None,
            notes: String::new(),
        }
    }

    #[test]
    fn test_open_investment_uses_live_price() {
        let inv = investment("1", "Solana", "2024-01-01", dec!(2), dec!(200));
        let prices = PriceMap::from_iter([("solana", dec!(150))]);
        let valued = value_investment(&inv, &prices);

        assert_eq!(valued.current_value, dec!(300));
        assert_eq!(valued.profit_loss, dec!(100));
        assert_eq!(valued.profit_loss_percentage, dec!(50));
    }

    #[test]
    fn test_closed_investment_keeps_close_price() {
        let mut inv = investment("1", "Solana", "2024-01-01", dec!(2), dec!(200));
        inv.status = InvestmentStatus::Closed;
        inv.close_price = Some(dec!(80));
        let prices = PriceMap::from_iter([("solana", dec!(150))]);
        let valued = value_investment(&inv, &prices);

        assert_eq!(valued.current_price, dec!(80));
        assert_eq!(valued.profit_loss, dec!(-40));
        assert_eq!(valued.profit_loss_percentage, dec!(-20));
    }

    #[test]
    fn test_zero_amount_paid_has_zero_percentage() {
        let inv = investment("1", "Airdrop", "2024-01-01", dec!(10), dec!(0));
        let prices = PriceMap::from_iter([("airdrop", dec!(1))]);
        assert_eq!(value_investment(&inv, &prices).profit_loss_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_summary_filters_closed_but_reports_realised() {
        let open = investment("1", "Solana", "2024-01-01", dec!(2), dec!(200));
        let mut closed = investment("2", "Uniswap", "2024-01-01", dec!(10), dec!(100));
        closed.status = InvestmentStatus::Closed;
        closed.close_price = Some(dec!(15));
        let prices = PriceMap::from_iter([("solana", dec!(150))]);
        let valued = value_investments(&[open, closed], &prices);

        let summary = calculate_spot_summary(&valued, false);
        assert_eq!(summary.open_positions_count, 1);
        assert_eq!(summary.total_invested, dec!(200));
        assert_eq!(summary.total_current_value, dec!(300));
        assert_eq!(summary.total_profit_loss_percentage, dec!(50));
        assert_eq!(summary.realised_profit_loss, dec!(50));

        let with_closed = calculate_spot_summary(&valued, true);
        assert_eq!(with_closed.total_invested, dec!(300));
        assert_eq!(with_closed.total_profit_loss, dec!(150));
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(calculate_spot_summary(&[], false), SpotSummary::default());
    }

    #[test]
    fn test_sort_newest_first_then_by_name() {
        let prices = PriceMap::new();
        let mut valued = value_investments(
            &[
                investment("1", "Solana", "2024-01-01", dec!(1), dec!(1)),
                investment("2", "Chainlink", "2024-03-01", dec!(1), dec!(1)),
                investment("3", "Bitcoin", "1/1/2024", dec!(1), dec!(1)),
                investment("4", "Morpho", "", dec!(1), dec!(1)),
            ],
            &prices,
        );
        sort_investments(&mut valued);
        let ids: Vec<&str> = valued.iter().map(|v| v.investment.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1", "4"]);
    }

    #[test]
    fn test_sort_by_profit_loss_percentage() {
        let prices = PriceMap::from_iter([("a", dec!(2)), ("b", dec!(1)), ("c", dec!(3))]);
        let mut valued = value_investments(
            &[
                investment("a", "A", "2024-01-01", dec!(1), dec!(1)),
                investment("b", "B", "2024-01-01", dec!(1), dec!(1)),
                investment("c", "C", "2024-01-01", dec!(1), dec!(1)),
            ],
            &prices,
        );
        sort_by_profit_loss_percentage(&mut valued, SortOrder::Descending);
        let ids: Vec<&str> = valued.iter().map(|v| v.investment.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
