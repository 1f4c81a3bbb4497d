use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ledger_errors::{LedgerError, Result};
use crate::transactions::{Transaction, TransactionSide};
use crate::utils::decimal_serde::decimal_serde;
use crate::utils::round_money;

/// Side of an open or closed lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LotSide {
    Long,
    Short,
}

/// An open lot: quantity acquired (long) or sold short (short) at one price
/// and date, not yet fully offset.
///
/// `commission` and `tax` are the full fees charged on the opening
/// transaction. They stay attached to the lot, unrecognized, until the
/// closing event that exhausts its remaining quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenLot {
    pub side: LotSide,
    #[serde(with = "decimal_serde")]
    pub quantity: Decimal,
    #[serde(with = "decimal_serde")]
    pub price: Decimal,
    pub open_date: NaiveDate,
    #[serde(with = "decimal_serde")]
    pub commission: Decimal,
    #[serde(with = "decimal_serde")]
    pub tax: Decimal,
}

/// Record of one lot-closing event, with realized P/L net of allocated fees
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedLot {
    pub side: LotSide,
    pub open_date: NaiveDate,
    pub close_date: NaiveDate,
    #[serde(with = "decimal_serde")]
    pub open_price: Decimal,
    #[serde(with = "decimal_serde")]
    pub close_price: Decimal,
    #[serde(with = "decimal_serde")]
    pub quantity: Decimal,
    #[serde(with = "decimal_serde")]
    pub profit_loss: Decimal,
}

/// One transaction as the matcher sees it: effective quantity and price
/// plus the fees charged on the transaction itself.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub side: TransactionSide,
    pub quantity: Decimal,
    pub price: Decimal,
    pub date: NaiveDate,
    pub commission: Decimal,
    pub tax: Decimal,
}

impl TryFrom<&Transaction> for LedgerEntry {
    type Error = LedgerError;

    fn try_from(tx: &Transaction) -> Result<Self> {
        let side = TransactionSide::from_str(&tx.side)
            .map_err(|_| LedgerError::UnsupportedSide(tx.side.clone()))?;
        if tx.quantity <= Decimal::ZERO {
            return Err(LedgerError::InvalidEntry(format!(
                "Transaction '{}' has non-positive quantity {}",
                tx.id, tx.quantity
            )));
        }
        // Zero is allowed: a dividend restatement can floor the price there
        if tx.price < Decimal::ZERO {
            return Err(LedgerError::InvalidEntry(format!(
                "Transaction '{}' has negative price {}",
                tx.id, tx.price
            )));
        }
        Ok(LedgerEntry {
            side,
            quantity: tx.quantity,
            price: tx.price,
            date: tx.transaction_date,
            commission: tx.commission,
            tax: tx.tax,
        })
    }
}

/// Open lots and closed-lot records derived from one instrument's history.
///
/// `long_lots` stays sorted ascending by price and `short_lots` descending,
/// with insertion order breaking ties, so closing always consumes the
/// extreme-price lot first (maximum realized gain). The book is a pure
/// function of the transaction log; it is never persisted.
#[derive(Debug, Clone, Default)]
pub struct LedgerBook {
    pub(super) long_lots: Vec<OpenLot>,
    pub(super) short_lots: Vec<OpenLot>,
    pub closed_lots: Vec<ClosedLot>,
}

impl LedgerBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn long_lots(&self) -> &[OpenLot] {
        &self.long_lots
    }

    pub fn short_lots(&self) -> &[OpenLot] {
        &self.short_lots
    }

    /// Net position: positive long, negative short
    pub fn net_position(&self) -> Decimal {
        let long: Decimal = self.long_lots.iter().map(|lot| lot.quantity).sum();
        let short: Decimal = self.short_lots.iter().map(|lot| lot.quantity).sum();
        long - short
    }

    /// Total realized P/L across all closed lots, rounded to 2 decimals
    pub fn realized_profit_loss(&self) -> Decimal {
        round_money(self.closed_lots.iter().map(|lot| lot.profit_loss).sum())
    }

    /// Open lots with signed quantities (long positive, short negative)
    pub fn open_lot_views(&self) -> Vec<OpenLotView> {
        let mut views: Vec<OpenLotView> = self
            .long_lots
            .iter()
            .map(|lot| OpenLotView::from_lot(lot, lot.quantity))
            .collect();
        views.extend(
            self.short_lots
                .iter()
                .map(|lot| OpenLotView::from_lot(lot, -lot.quantity)),
        );
        views
    }
}

/// Presentation row for a currently open lot, with signed quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenLotView {
    pub side: LotSide,
    #[serde(with = "decimal_serde")]
    pub quantity: Decimal,
    #[serde(with = "decimal_serde")]
    pub price: Decimal,
    pub open_date: NaiveDate,
    #[serde(with = "decimal_serde")]
    pub notional: Decimal,
}

impl OpenLotView {
    fn from_lot(lot: &OpenLot, signed_quantity: Decimal) -> Self {
        OpenLotView {
            side: lot.side,
            quantity: signed_quantity,
            price: lot.price,
            open_date: lot.open_date,
            notional: round_money(signed_quantity.abs() * lot.price),
        }
    }
}

/// Everything a detail view needs for one instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDetail {
    pub instrument_name: String,
    #[serde(with = "decimal_serde")]
    pub current_position: Decimal,
    #[serde(with = "decimal_serde")]
    pub realized_profit_loss: Decimal,
    pub open_lots: Vec<OpenLotView>,
    pub closed_lots: Vec<ClosedLot>,
    pub transactions: Vec<Transaction>,
}
