pub(crate) mod instruments_errors;
pub(crate) mod instruments_model;
pub(crate) mod instruments_repository;
pub(crate) mod instruments_service;
pub(crate) mod instruments_traits;

pub use instruments_errors::InstrumentError;
pub use instruments_model::{Instrument, InstrumentDB, InstrumentUpdate, NewInstrument};
pub use instruments_repository::InstrumentRepository;
pub use instruments_service::InstrumentService;
pub use instruments_traits::{InstrumentRepositoryTrait, InstrumentServiceTrait};
