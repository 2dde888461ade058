use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    Closed,
    #[default]
    #[serde(other)]
    Open, // Anything but "closed" is treated as open
}

/// A spot token purchase as recorded in the crypto tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub token_name: String,
    pub symbol: String,
    #[serde(default)]
    pub date_added: String,
    #[serde(default)]
    pub status: InvestmentStatus,
    pub quantity: Decimal,
    #[serde(default)]
    pub purchase_price: Decimal,
    pub amount_paid: Decimal,
    #[serde(default)]
    pub close_price: Option<Decimal>, // Sell price, fixed once closed
    #[serde(default)]
    pub sold: Option<Decimal>,
    #[serde(default)]
    pub notes: String,
}

impl Investment {
    pub fn is_closed(&self) -> bool {
        self.status == InvestmentStatus::Closed
    }
}

/// An investment marked to market
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedInvestment {
    pub investment: Investment,
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotSummary {
    pub open_positions_count: usize,
    pub total_invested: Decimal,
    pub total_current_value: Decimal,
    pub total_profit_loss: Decimal,
    pub total_profit_loss_percentage: Decimal,
    pub realised_profit_loss: Decimal, // Always over closed holdings, regardless of the filter
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}
