use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::instruments_errors::{InstrumentError, Result};
use crate::constants::{
    CLASS_CROSS_BORDER_EQUITY, CLASS_DOMESTIC_EQUITY, CLASS_FOREIGN_EQUITY,
};

/// Domain model representing a tradable instrument (master data)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub instrument_class: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInstrument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub instrument_class: String,
}

impl NewInstrument {
    /// Validates the new instrument data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(InstrumentError::InvalidData(
                "Instrument name cannot be empty".to_string(),
            ));
        }
        validate_class(&self.instrument_class)?;
        Ok(())
    }
}

/// Input model for updating an existing instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentUpdate {
    pub id: String,
    pub name: String,
    pub instrument_class: String,
}

impl InstrumentUpdate {
    /// Validates the instrument update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(InstrumentError::InvalidData(
                "Instrument ID is required for updates".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(InstrumentError::InvalidData(
                "Instrument name cannot be empty".to_string(),
            ));
        }
        validate_class(&self.instrument_class)?;
        Ok(())
    }
}

fn validate_class(class: &str) -> Result<()> {
    match class {
        CLASS_DOMESTIC_EQUITY | CLASS_CROSS_BORDER_EQUITY | CLASS_FOREIGN_EQUITY => Ok(()),
        other => Err(InstrumentError::InvalidData(format!(
            "Unknown instrument class: {}",
            other
        ))),
    }
}

/// Database model for instruments
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
#[diesel(table_name = crate::schema::instruments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InstrumentDB {
    pub id: String,
    pub name: String,
    pub instrument_class: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<InstrumentDB> for Instrument {
    fn from(db: InstrumentDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            instrument_class: db.instrument_class,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewInstrument> for InstrumentDB {
    fn from(domain: NewInstrument) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name.trim().to_string(),
            instrument_class: domain.instrument_class,
            created_at: now,
            updated_at: now,
        }
    }
}
