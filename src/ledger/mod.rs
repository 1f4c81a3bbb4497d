pub(crate) mod ledger_errors;
pub(crate) mod ledger_model;
pub(crate) mod matcher;

pub use ledger_errors::LedgerError;
pub use ledger_model::{
    ClosedLot, InstrumentDetail, LedgerBook, LedgerEntry, LotSide, OpenLot, OpenLotView,
};
pub use matcher::derive_ledger;
