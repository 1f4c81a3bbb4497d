use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for corporate-action operations
#[derive(Debug, Error)]
pub enum CorporateActionError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, CorporateActionError>;

impl From<DieselError> for CorporateActionError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => {
                CorporateActionError::NotFound("Record not found".to_string())
            }
            _ => CorporateActionError::DatabaseError(err.to_string()),
        }
    }
}
