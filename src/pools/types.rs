use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the earnings of a row were withdrawn into the holder's wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gathered {
    Yes,
    #[default]
    No,
}

impl Gathered {
    pub fn is_gathered(&self) -> bool {
        matches!(self, Gathered::Yes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolStatus {
    Open,
    Closed,
}

impl PoolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolStatus::Open => "open",
            PoolStatus::Closed => "closed",
        }
    }
}

/// One earning period of a pool position, as persisted by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningRow {
    pub id: String,
    #[serde(default)]
    pub principal: Decimal,
    #[serde(default)]
    pub start_date: String, // "YYYY-MM-DD", empty while the form is incomplete
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub earnings: Decimal, // Signed, losses are negative
    #[serde(default)]
    pub gathered: Gathered,
}

/// One liquidity pool deposit tracked over its lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPosition {
    pub id: String,
    pub pool_name: String,
    pub token_symbol: String, // Price feed key, e.g. "solana"
    pub range_from: Decimal,
    pub range_to: Decimal,
    pub status: PoolStatus,
    #[serde(default)]
    pub earning_rows: Vec<EarningRow>, // Chronological by convention
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl PoolPosition {
    pub fn is_open(&self) -> bool {
        self.status == PoolStatus::Open
    }

    /// Principal of the most recent earning row, zero for a position without rows
    pub fn latest_principal(&self) -> Decimal {
        self.earning_rows
            .last()
            .map(|row| row.principal)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_earnings(&self) -> Decimal {
        self.earning_rows.iter().map(|row| row.earnings).sum()
    }

    pub fn gathered_earnings(&self) -> Decimal {
        self.earning_rows
            .iter()
            .filter(|row| row.gathered.is_gathered())
            .map(|row| row.earnings)
            .sum()
    }

    /// Inclusive on both bounds
    pub fn is_in_range(&self, current_price: Decimal) -> bool {
        current_price >= self.range_from && current_price <= self.range_to
    }
}

/// Derived per-position figures, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMetrics {
    pub days: i64,
    pub earning_per_day: Decimal,
    pub apr: Decimal, // Percent
}

/// Portfolio-wide figures over all pool positions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolsSummary {
    pub open_positions_count: usize,
    pub total_invested: Decimal,
    pub total_profit_loss: Decimal, // Unrealised, open positions only
    pub realised_profit_loss: Decimal,
    pub total_earning_per_day: Decimal, // In-range open positions only
    pub in_range_count: usize,
    pub out_of_range_count: usize,
}

/// Reporting view of a single position against the current price
#[derive(Debug, Clone, PartialEq)]
pub struct PoolView<'a> {
    pub pool: &'a PoolPosition,
    pub metrics: PoolMetrics,
    pub current_price: Decimal,
    pub in_range: bool,
}
