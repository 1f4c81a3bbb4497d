use thiserror::Error;

/// Custom error type for ledger derivation
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Unsupported transaction side: {0}")]
    UnsupportedSide(String),
    #[error("Invalid ledger entry: {0}")]
    InvalidEntry(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
