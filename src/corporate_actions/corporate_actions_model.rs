use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::corporate_actions_constants::*;
use super::corporate_actions_errors::{CorporateActionError, Result};
use crate::constants::DATE_FORMAT;
use crate::transactions::transactions_model::parse_decimal_string_tolerant;
use crate::utils::decimal_serde::decimal_serde_option;

/// Enum representing the kind of corporate action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorporateActionType {
    Dividend,
    Split,
    ReverseSplit,
}

impl CorporateActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorporateActionType::Dividend => ACTION_DIVIDEND,
            CorporateActionType::Split => ACTION_SPLIT,
            CorporateActionType::ReverseSplit => ACTION_REVERSE_SPLIT,
        }
    }
}

impl FromStr for CorporateActionType {
    type Err = CorporateActionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ACTION_DIVIDEND => Ok(CorporateActionType::Dividend),
            ACTION_SPLIT => Ok(CorporateActionType::Split),
            ACTION_REVERSE_SPLIT => Ok(CorporateActionType::ReverseSplit),
            other => Err(CorporateActionError::InvalidData(format!(
                "Action type must be DIVIDEND, SPLIT or REVERSE_SPLIT, got '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a corporate action.
///
/// Splits and reverse splits carry a `ratio`, dividends a per-share
/// `amount`; exactly one of the two is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateAction {
    pub id: String,
    pub instrument_name: String,
    pub action_type: String,
    pub action_date: NaiveDate,
    #[serde(with = "decimal_serde_option")]
    pub ratio: Option<Decimal>,
    #[serde(with = "decimal_serde_option")]
    pub amount: Option<Decimal>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for recording a new corporate action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCorporateAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub instrument_name: String,
    pub action_type: String,
    pub action_date: String,
    pub ratio: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub note: Option<String>,
}

fn validate_fields(
    instrument_name: &str,
    action_type: &str,
    action_date: &str,
    ratio: Option<Decimal>,
    amount: Option<Decimal>,
) -> Result<()> {
    if instrument_name.trim().is_empty() {
        return Err(CorporateActionError::InvalidData(
            "Instrument name cannot be empty".to_string(),
        ));
    }
    let parsed_type = CorporateActionType::from_str(action_type)?;
    if NaiveDate::parse_from_str(action_date, DATE_FORMAT).is_err() {
        return Err(CorporateActionError::InvalidData(
            "Invalid date format. Expected YYYY-MM-DD".to_string(),
        ));
    }
    match parsed_type {
        CorporateActionType::Dividend => {
            let amount = amount.ok_or_else(|| {
                CorporateActionError::InvalidData(
                    "A dividend requires a per-share amount".to_string(),
                )
            })?;
            if !amount.is_sign_positive() || amount.is_zero() {
                return Err(CorporateActionError::InvalidData(
                    "Dividend amount must be positive".to_string(),
                ));
            }
            if ratio.is_some() {
                return Err(CorporateActionError::InvalidData(
                    "A dividend must not carry a ratio".to_string(),
                ));
            }
        }
        CorporateActionType::Split | CorporateActionType::ReverseSplit => {
            let ratio = ratio.ok_or_else(|| {
                CorporateActionError::InvalidData("A split requires a ratio".to_string())
            })?;
            if !ratio.is_sign_positive() || ratio.is_zero() {
                return Err(CorporateActionError::InvalidData(
                    "Split ratio must be positive".to_string(),
                ));
            }
            if amount.is_some() {
                return Err(CorporateActionError::InvalidData(
                    "A split must not carry a per-share amount".to_string(),
                ));
            }
        }
    }
    Ok(())
}

impl NewCorporateAction {
    /// Validates the new corporate action data
    pub fn validate(&self) -> Result<()> {
        validate_fields(
            &self.instrument_name,
            &self.action_type,
            &self.action_date,
            self.ratio,
            self.amount,
        )
    }

    pub fn parsed_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.action_date, DATE_FORMAT).map_err(|_| {
            CorporateActionError::InvalidData(
                "Invalid date format. Expected YYYY-MM-DD".to_string(),
            )
        })
    }
}

/// Input model for updating an existing corporate action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateActionUpdate {
    pub id: String,
    pub instrument_name: String,
    pub action_type: String,
    pub action_date: String,
    pub ratio: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub note: Option<String>,
}

impl CorporateActionUpdate {
    /// Validates the corporate action update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CorporateActionError::InvalidData(
                "Corporate action ID is required for updates".to_string(),
            ));
        }
        validate_fields(
            &self.instrument_name,
            &self.action_type,
            &self.action_date,
            self.ratio,
            self.amount,
        )
    }

    pub fn parsed_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.action_date, DATE_FORMAT).map_err(|_| {
            CorporateActionError::InvalidData(
                "Invalid date format. Expected YYYY-MM-DD".to_string(),
            )
        })
    }
}

/// Database model for corporate actions; decimal columns travel as TEXT
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
#[diesel(table_name = crate::schema::corporate_actions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CorporateActionDB {
    pub id: String,
    pub instrument_name: String,
    pub action_type: String,
    pub action_date: NaiveDate,
    pub ratio: Option<String>,
    pub amount: Option<String>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<CorporateActionDB> for CorporateAction {
    fn from(db: CorporateActionDB) -> Self {
        Self {
            id: db.id,
            instrument_name: db.instrument_name,
            action_type: db.action_type,
            action_date: db.action_date,
            ratio: db
                .ratio
                .as_deref()
                .map(|v| parse_decimal_string_tolerant(v, "ratio")),
            amount: db
                .amount
                .as_deref()
                .map(|v| parse_decimal_string_tolerant(v, "amount")),
            note: db.note,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
