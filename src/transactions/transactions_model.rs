use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use log::error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::transactions_constants::*;
use super::transactions_errors::{Result, TransactionError};
use crate::constants::DATE_FORMAT;
use crate::utils::decimal_serde::{decimal_serde, decimal_serde_option};

/// Helper function to parse a string into a Decimal,
/// with a fallback for scientific notation by parsing as f64 first.
pub(crate) fn parse_decimal_string_tolerant(value_str: &str, field_name: &str) -> Decimal {
    use rust_decimal::prelude::FromPrimitive;

    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value_str) {
            Ok(f_val) => Decimal::from_f64(f_val).unwrap_or_else(|| {
                error!(
                    "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                    field_name, value_str, f_val
                );
                Decimal::ZERO
            }),
            Err(e_f64) => {
                error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name, value_str, e_decimal, e_f64
                );
                Decimal::ZERO
            }
        },
    }
}

/// Enum representing the side of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionSide {
    Buy,
    Sell,
}

impl TransactionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSide::Buy => SIDE_BUY,
            TransactionSide::Sell => SIDE_SELL,
        }
    }
}

impl FromStr for TransactionSide {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            SIDE_BUY => Ok(TransactionSide::Buy),
            SIDE_SELL => Ok(TransactionSide::Sell),
            other => Err(TransactionError::InvalidData(format!(
                "Transaction side must be BUY or SELL, got '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a transaction in the ledger.
///
/// `quantity` and `price` are the effective values, rewritten only by
/// corporate-action restatement. `original_quantity` and `original_price`
/// are set once at creation and never change afterwards; restatement always
/// derives effective values from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub instrument_name: String,
    pub side: String,
    #[serde(with = "decimal_serde")]
    pub quantity: Decimal,
    #[serde(with = "decimal_serde")]
    pub price: Decimal,
    #[serde(with = "decimal_serde_option")]
    pub original_quantity: Option<Decimal>,
    #[serde(with = "decimal_serde_option")]
    pub original_price: Option<Decimal>,
    #[serde(with = "decimal_serde")]
    pub total_amount: Decimal,
    #[serde(with = "decimal_serde")]
    pub commission: Decimal,
    #[serde(with = "decimal_serde")]
    pub tax: Decimal,
    #[serde(with = "decimal_serde")]
    pub profit_loss: Decimal,
    pub transaction_date: NaiveDate,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub instrument_name: String,
    pub side: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub transaction_date: String,
    /// Manual commission, honored only for the foreign-equity fee schedule
    pub commission: Option<Decimal>,
    pub note: Option<String>,
}

impl NewTransaction {
    /// Validates the new transaction data
    pub fn validate(&self) -> Result<()> {
        if self.instrument_name.trim().is_empty() {
            return Err(TransactionError::InvalidData(
                "Instrument name cannot be empty".to_string(),
            ));
        }
        if !TRANSACTION_SIDES.contains(&self.side.as_str()) {
            return Err(TransactionError::InvalidData(format!(
                "Transaction side must be BUY or SELL, got '{}'",
                self.side
            )));
        }
        if !self.quantity.is_sign_positive() || self.quantity.is_zero() {
            return Err(TransactionError::InvalidData(
                "Quantity must be positive".to_string(),
            ));
        }
        if !self.price.is_sign_positive() || self.price.is_zero() {
            return Err(TransactionError::InvalidData(
                "Price must be positive".to_string(),
            ));
        }
        if NaiveDate::parse_from_str(&self.transaction_date, DATE_FORMAT).is_err() {
            return Err(TransactionError::InvalidData(
                "Invalid date format. Expected YYYY-MM-DD".to_string(),
            ));
        }
        Ok(())
    }

    pub fn parsed_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.transaction_date, DATE_FORMAT).map_err(|_| {
            TransactionError::InvalidData("Invalid date format. Expected YYYY-MM-DD".to_string())
        })
    }
}

/// Input model for updating an existing transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: String,
    pub instrument_name: String,
    pub side: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub transaction_date: String,
    pub commission: Option<Decimal>,
    pub note: Option<String>,
}

impl TransactionUpdate {
    /// Validates the transaction update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(TransactionError::InvalidData(
                "Transaction ID is required for updates".to_string(),
            ));
        }
        NewTransaction {
            id: None,
            instrument_name: self.instrument_name.clone(),
            side: self.side.clone(),
            quantity: self.quantity,
            price: self.price,
            transaction_date: self.transaction_date.clone(),
            commission: self.commission,
            note: self.note.clone(),
        }
        .validate()
    }

    pub fn parsed_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.transaction_date, DATE_FORMAT).map_err(|_| {
            TransactionError::InvalidData("Invalid date format. Expected YYYY-MM-DD".to_string())
        })
    }
}

/// Effective values for one transaction after a restatement pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRestatement {
    pub transaction_id: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total_amount: Decimal,
}

/// Database model for transactions; decimal columns travel as TEXT
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: String,
    pub instrument_name: String,
    pub side: String,
    pub quantity: String,
    pub price: String,
    pub original_quantity: Option<String>,
    pub original_price: Option<String>,
    pub total_amount: String,
    pub commission: String,
    pub tax: String,
    pub profit_loss: String,
    pub transaction_date: NaiveDate,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            id: db.id,
            instrument_name: db.instrument_name,
            side: db.side,
            quantity: parse_decimal_string_tolerant(&db.quantity, "quantity"),
            price: parse_decimal_string_tolerant(&db.price, "price"),
            original_quantity: db
                .original_quantity
                .as_deref()
                .map(|v| parse_decimal_string_tolerant(v, "original_quantity")),
            original_price: db
                .original_price
                .as_deref()
                .map(|v| parse_decimal_string_tolerant(v, "original_price")),
            total_amount: parse_decimal_string_tolerant(&db.total_amount, "total_amount"),
            commission: parse_decimal_string_tolerant(&db.commission, "commission"),
            tax: parse_decimal_string_tolerant(&db.tax, "tax"),
            profit_loss: parse_decimal_string_tolerant(&db.profit_loss, "profit_loss"),
            transaction_date: db.transaction_date,
            note: db.note,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
