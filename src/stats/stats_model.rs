use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::decimal_serde::decimal_serde;

/// Aggregated trading totals for one instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentStats {
    pub instrument_name: String,
    #[serde(with = "decimal_serde")]
    pub total_buy_amount: Decimal,
    #[serde(with = "decimal_serde")]
    pub total_sell_amount: Decimal,
    #[serde(with = "decimal_serde")]
    pub total_buy_quantity: Decimal,
    #[serde(with = "decimal_serde")]
    pub total_sell_quantity: Decimal,
    #[serde(with = "decimal_serde")]
    pub realized_profit_loss: Decimal,
    pub transaction_count: usize,
}

/// Per-instrument stats plus the rollup across all instruments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossStats {
    pub instruments: Vec<InstrumentStats>,
    pub overall: OverallStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    #[serde(with = "decimal_serde")]
    pub total_buy_amount: Decimal,
    #[serde(with = "decimal_serde")]
    pub total_sell_amount: Decimal,
    #[serde(with = "decimal_serde")]
    pub realized_profit_loss: Decimal,
    pub transaction_count: usize,
}
