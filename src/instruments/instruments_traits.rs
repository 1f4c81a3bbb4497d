use super::instruments_model::{Instrument, InstrumentUpdate, NewInstrument};
use crate::Result;

/// Trait defining the contract for Instrument repository operations.
pub trait InstrumentRepositoryTrait: Send + Sync {
    fn get_instruments(&self) -> Result<Vec<Instrument>>;
    fn get_instrument_by_id(&self, instrument_id: &str) -> Result<Instrument>;
    fn get_instrument_by_name(&self, name: &str) -> Result<Option<Instrument>>;
    fn count_transactions(&self, name: &str) -> Result<i64>;
    fn create_instrument(&self, new_instrument: NewInstrument) -> Result<Instrument>;
    fn update_instrument(&self, update: InstrumentUpdate) -> Result<Instrument>;
    fn delete_instrument(&self, instrument_id: &str) -> Result<Instrument>;
}

/// Trait defining the contract for Instrument service operations.
pub trait InstrumentServiceTrait: Send + Sync {
    fn get_instruments(&self) -> Result<Vec<Instrument>>;
    fn get_instrument(&self, instrument_id: &str) -> Result<Instrument>;
    fn get_instrument_by_name(&self, name: &str) -> Result<Instrument>;
    /// Returns the fee-schedule class of a known instrument.
    fn class_of(&self, name: &str) -> Result<String>;
    fn create_instrument(&self, new_instrument: NewInstrument) -> Result<Instrument>;
    fn update_instrument(&self, update: InstrumentUpdate) -> Result<Instrument>;
    fn delete_instrument(&self, instrument_id: &str) -> Result<Instrument>;
}
