use log::debug;
use std::sync::Arc;

use super::instruments_errors::InstrumentError;
use super::instruments_model::{Instrument, InstrumentUpdate, NewInstrument};
use super::instruments_traits::{InstrumentRepositoryTrait, InstrumentServiceTrait};
use crate::Result;

/// Service for managing instrument master data
pub struct InstrumentService {
    instrument_repository: Arc<dyn InstrumentRepositoryTrait>,
}

impl InstrumentService {
    /// Creates a new InstrumentService instance
    pub fn new(instrument_repository: Arc<dyn InstrumentRepositoryTrait>) -> Self {
        Self {
            instrument_repository,
        }
    }
}

impl InstrumentServiceTrait for InstrumentService {
    fn get_instruments(&self) -> Result<Vec<Instrument>> {
        self.instrument_repository.get_instruments()
    }

    fn get_instrument(&self, instrument_id: &str) -> Result<Instrument> {
        self.instrument_repository
            .get_instrument_by_id(instrument_id)
    }

    fn get_instrument_by_name(&self, name: &str) -> Result<Instrument> {
        self.instrument_repository
            .get_instrument_by_name(name)?
            .ok_or_else(|| {
                InstrumentError::NotFound(format!("Instrument '{}' not found", name)).into()
            })
    }

    fn class_of(&self, name: &str) -> Result<String> {
        Ok(self.get_instrument_by_name(name)?.instrument_class)
    }

    /// Creates a new instrument, rejecting duplicate names
    fn create_instrument(&self, new_instrument: NewInstrument) -> Result<Instrument> {
        new_instrument.validate()?;

        let trimmed = new_instrument.name.trim();
        if self
            .instrument_repository
            .get_instrument_by_name(trimmed)?
            .is_some()
        {
            return Err(InstrumentError::InvalidData(format!(
                "Instrument name '{}' already exists",
                trimmed
            ))
            .into());
        }

        debug!("Creating instrument '{}'", trimmed);
        self.instrument_repository.create_instrument(new_instrument)
    }

    /// Updates an instrument, keeping names unique across instruments
    fn update_instrument(&self, update: InstrumentUpdate) -> Result<Instrument> {
        update.validate()?;

        let trimmed = update.name.trim();
        if let Some(existing) = self.instrument_repository.get_instrument_by_name(trimmed)? {
            if existing.id != update.id {
                return Err(InstrumentError::InvalidData(format!(
                    "Instrument name '{}' is already in use",
                    trimmed
                ))
                .into());
            }
        }

        self.instrument_repository.update_instrument(update)
    }

    /// Deletes an instrument unless transactions still reference it
    fn delete_instrument(&self, instrument_id: &str) -> Result<Instrument> {
        let existing = self
            .instrument_repository
            .get_instrument_by_id(instrument_id)?;

        let referencing = self.instrument_repository.count_transactions(&existing.name)?;
        if referencing > 0 {
            return Err(InstrumentError::Conflict(format!(
                "Instrument '{}' has {} transactions and cannot be deleted",
                existing.name, referencing
            ))
            .into());
        }

        self.instrument_repository.delete_instrument(instrument_id)
    }
}
