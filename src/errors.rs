use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::corporate_actions::CorporateActionError;
use crate::instruments::InstrumentError;
use crate::ledger::LedgerError;
use crate::transactions::TransactionError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger application
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("Corporate action error: {0}")]
    CorporateAction(#[from] CorporateActionError),

    #[error("Ledger derivation failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Ledger invariant violated: {0}")]
    InvariantViolation(String),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(#[from] diesel::result::ConnectionError),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(#[from] r2d2::Error),

    #[error("Database query failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Database(DatabaseError::MigrationFailed(err.to_string()))
    }
}
